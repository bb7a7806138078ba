use sqlcanon_ast::types::{Ident, ObjectName};

/// The raw value of an identifier, stripped of its quote style; the
/// canonical tree never records how a name was quoted in the source.
pub(crate) fn ident_value(ident: &Ident) -> String {
    ident.value.clone()
}

/// A dotted object name rendered as a plain string, e.g. `dbo.t`.
pub(crate) fn object_name_value(name: &ObjectName) -> String {
    name.0
        .iter()
        .map(|part| part.value.as_str())
        .collect::<Vec<_>>()
        .join(".")
}
