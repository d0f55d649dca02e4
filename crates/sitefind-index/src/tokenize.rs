//! Text tokenization.
//!
//! Splits text on non-alphanumeric boundaries, lowercases, and drops tokens
//! below the minimum length. Queries and documents go through the same
//! path so a query term always matches its indexed form.

/// Default minimum token length.
pub const DEFAULT_MIN_TERM_LEN: usize = 2;

/// Tokenize text into normalized terms.
pub fn tokenize_text(text: &str, min_term_len: usize) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= min_term_len)
        .map(|word| word.to_lowercase())
        .collect()
}

/// Tokenize a query string.
pub fn tokenize_query(query: &str, min_term_len: usize) -> Vec<String> {
    tokenize_text(query, min_term_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_text() {
        let terms = tokenize_text("Hello World! This is a test.", DEFAULT_MIN_TERM_LEN);
        assert!(terms.contains(&"hello".to_string()));
        assert!(terms.contains(&"world".to_string()));
        assert!(terms.contains(&"test".to_string()));
        // Single character "a" is filtered out
        assert!(!terms.contains(&"a".to_string()));
    }

    #[test]
    fn test_tokenize_punctuation_boundaries() {
        let terms = tokenize_text("kubectl-trace run --pid=123", DEFAULT_MIN_TERM_LEN);
        assert_eq!(terms, vec!["kubectl", "trace", "run", "pid", "123"]);
    }

    #[test]
    fn test_tokenize_min_length() {
        let terms = tokenize_text("go is ok", 3);
        assert!(terms.is_empty());

        let terms = tokenize_text("go is ok", 2);
        assert_eq!(terms, vec!["go", "is", "ok"]);
    }

    #[test]
    fn test_tokenize_empty_query() {
        assert!(tokenize_query("", DEFAULT_MIN_TERM_LEN).is_empty());
        assert!(tokenize_query("  \t ", DEFAULT_MIN_TERM_LEN).is_empty());
    }
}
