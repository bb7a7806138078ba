#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;

/// Displays a slice of `Display`-able items, comma-separated.
pub(crate) fn display_comma_separated<T: fmt::Display>(slice: &[T]) -> impl fmt::Display + '_ {
    DisplaySeparated { slice, sep: ", " }
}

/// Displays a slice of `Display`-able items, joined with an arbitrary separator.
pub(crate) fn display_separated<'a, T: fmt::Display>(
    slice: &'a [T],
    sep: &'a str,
) -> impl fmt::Display + 'a {
    DisplaySeparated { slice, sep }
}

struct DisplaySeparated<'a, T> {
    slice: &'a [T],
    sep: &'a str,
}

impl<'a, T: fmt::Display> fmt::Display for DisplaySeparated<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for item in self.slice {
            if !first {
                f.write_str(self.sep)?;
            }
            first = false;
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// Escapes single quotes in a string literal by doubling them, as ANSI SQL
/// requires: `it's` -> `it''s`.
pub(crate) fn escape_single_quote_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == '\'' {
            escaped.push('\'');
        }
        escaped.push(ch);
    }
    escaped
}

/// Displays `CONSTRAINT <name> ` when a constraint is named, else nothing.
pub(crate) fn display_constraint_name(
    name: &Option<crate::types::Ident>,
) -> impl fmt::Display + '_ {
    struct ConstraintName<'a>(&'a Option<crate::types::Ident>);
    impl<'a> fmt::Display for ConstraintName<'a> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if let Some(name) = self.0 {
                write!(f, "CONSTRAINT {} ", name)
            } else {
                Ok(())
            }
        }
    }
    ConstraintName(name)
}
