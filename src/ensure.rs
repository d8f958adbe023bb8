//! Argument validation helpers.

use crate::error::SoapError;

/// True when `s` is empty or only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Return `s` unchanged, or an invalid-argument error carrying `message` when blank.
pub fn ensure_string<'a>(s: &'a str, message: &str) -> Result<&'a str, SoapError> {
    if is_blank(s) {
        return Err(SoapError::invalid_argument(message));
    }
    Ok(s)
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// True when `s` is an XML name without a colon (an NCName).
pub fn is_ncname(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Return `s` unchanged, or a protocol error when it cannot name an element.
pub fn ensure_ncname<'a>(s: &'a str, what: &str) -> Result<&'a str, SoapError> {
    if !is_ncname(s) {
        return Err(SoapError::protocol(format!(
            "Invalid XML name for {}: '{}'",
            what, s
        )));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_ensure_string() {
        assert_eq!(ensure_string("token", "Must provide a name").unwrap(), "token");

        let err = ensure_string("  ", "Must provide a name").unwrap_err();
        assert!(matches!(err, SoapError::InvalidArgument(ref m) if m == "Must provide a name"));
    }

    #[test]
    fn test_is_ncname() {
        assert!(is_ncname("token"));
        assert!(is_ncname("_id"));
        assert!(is_ncname("a-b.c9"));
        assert!(is_ncname("Größe"));
        assert!(!is_ncname("bad name"));
        assert!(!is_ncname("a<b"));
        assert!(!is_ncname("9lives"));
        assert!(!is_ncname("-x"));
        assert!(!is_ncname("ns:local"));
        assert!(!is_ncname(""));
    }

    #[test]
    fn test_ensure_ncname_is_protocol_error() {
        assert_eq!(ensure_ncname("Auth", "header name").unwrap(), "Auth");

        let err = ensure_ncname("a<b", "child name").unwrap_err();
        assert!(err.is_protocol());
        assert!(err.to_string().contains("child name"));
    }
}
