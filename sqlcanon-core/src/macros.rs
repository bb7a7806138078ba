/// Expands to a list of keyword variants, sorted, that implements `KeywordDef`
/// by binary search over both the variant list and a parallel string list.
///
/// **NOTE**: All keywords must be listed in sorted order — lookup relies on
/// binary search over `KEYWORD_STRINGS`.
#[macro_export]
macro_rules! define_keyword {
    (
        $(#[$doc:meta])*
        $name:ident => {
            $( $keyword:ident ),* $(,)?
        }
    ) => {
        $(#[$doc])*
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($keyword),*
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }

        impl $crate::KeywordDef for $name {
            const KEYWORDS: &'static [Self] = &[
                $(Self::$keyword),*
            ];
            const KEYWORD_STRINGS: &'static [&'static str] = &[
                $(stringify!($keyword)),*
            ];
        }
    };
}
