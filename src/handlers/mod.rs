// Handlers are split by security tier:
// public (no token) and protected (bearer token checked by `middleware::require_auth`).
pub mod public;
pub mod protected;

/// Treats absent and empty strings alike; only non-empty values count as provided.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_missing() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("neo".to_string())), Some("neo".to_string()));
    }
}
