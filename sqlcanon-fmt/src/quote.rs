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

/// A single-quoted, `''`-escaped string literal.
pub(crate) fn quote_string_literal(s: &str) -> String {
    format!("'{}'", escape_single_quote_string(s))
}

/// Whether `name` requires delimiting to round-trip as an identifier: it's
/// empty, contains anything other than `[A-Za-z0-9_$]`, starts with a
/// digit, or collides with a reserved word. The formatter has no access to
/// a keyword table here (identifiers lose their dialect once scrubbed into
/// plain strings), so reserved-word collision is intentionally not checked;
/// callers who need that should supply `should_quote`.
fn default_should_quote(name: &str) -> bool {
    if name.is_empty() || name == "*" {
        return false;
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap();
    if !(first.is_ascii_alphabetic() || first == '_') {
        return true;
    }
    !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}

/// Quotes `name` as an identifier if it needs it, per `ansi_quotes` (`"`
/// when true, `` ` `` otherwise) and the caller's `should_quote` override.
/// A dotted compound identifier (`a.b.c`) quotes each part independently.
pub(crate) fn quote_ident(
    name: &str,
    ansi_quotes: bool,
    should_quote: &Option<std::sync::Arc<dyn Fn(&str) -> bool + Send + Sync>>,
) -> String {
    if name == "*" || name.ends_with(".*") {
        return name.to_string();
    }
    if name.contains('.') {
        return name
            .split('.')
            .map(|part| quote_ident(part, ansi_quotes, should_quote))
            .collect::<Vec<_>>()
            .join(".");
    }
    let quote = match should_quote {
        Some(predicate) => predicate(name),
        None => default_should_quote(name),
    };
    if !quote {
        return name.to_string();
    }
    let quote_char = if ansi_quotes { '"' } else { '`' };
    format!("{0}{1}{0}", quote_char, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_unquoted() {
        assert_eq!(quote_ident("a_1", true, &None), "a_1");
    }

    #[test]
    fn identifier_with_space_is_quoted() {
        assert_eq!(quote_ident("col one", true, &None), "\"col one\"");
        assert_eq!(quote_ident("col one", false, &None), "`col one`");
    }

    #[test]
    fn string_literal_escapes_quotes() {
        assert_eq!(quote_string_literal("it's"), "'it''s'");
    }

    #[test]
    fn dotted_identifier_quotes_each_part() {
        assert_eq!(quote_ident("dbo.col one", true, &None), "dbo.\"col one\"");
    }
}
