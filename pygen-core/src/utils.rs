//! Python identifier rules.

/// Python hard keywords that cannot be used as identifiers.
/// Source: https://docs.python.org/3/reference/lexical_analysis.html#keywords
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Check if a name is a Python reserved keyword
pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Validate that a name is a usable Python identifier.
/// Returns None if valid, Some(reason) if invalid
///
/// Only ASCII identifiers are accepted; soft keywords such as `match` or
/// `type` are allowed.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    if is_python_keyword(name) {
        return Some("name is a Python reserved keyword");
    }

    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("hello").is_none());
        assert!(validate_identifier("hello_world").is_none());
        assert!(validate_identifier("HelloWorld").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("__init__").is_none());
        assert!(validate_identifier("arg1").is_none());
        // Soft keywords are ordinary identifiers
        assert!(validate_identifier("match").is_none());
        assert!(validate_identifier("type").is_none());
    }

    #[test]
    fn test_reserved_keywords() {
        for kw in ["def", "class", "lambda", "None", "True", "yield", "import", "pass"] {
            assert!(validate_identifier(kw).is_some(), "{kw} should be rejected");
        }
    }

    #[test]
    fn test_invalid_start_character() {
        assert!(validate_identifier("123abc").is_some());
        assert!(validate_identifier("-name").is_some());
    }

    #[test]
    fn test_invalid_characters() {
        assert!(validate_identifier("hello.world").is_some());
        assert!(validate_identifier("hello world").is_some());
        assert!(validate_identifier("hello-world").is_some());
        assert!(validate_identifier("name@test").is_some());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_identifier(""), Some("name cannot be empty"));
    }

    #[test]
    fn test_is_python_keyword() {
        assert!(is_python_keyword("def"));
        assert!(is_python_keyword("nonlocal"));
        assert!(!is_python_keyword("self"));
        assert!(!is_python_keyword("print"));
    }
}
