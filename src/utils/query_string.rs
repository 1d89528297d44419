use urlencoding::encode;

/// Build a percent-encoded query string from key-value pairs, keeping order.
pub fn build_query_string(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        let pairs = vec![
            ("region".to_string(), "eu west".to_string()),
            ("category".to_string(), "compute_instance".to_string()),
        ];
        assert_eq!(build_query_string(&pairs), "region=eu%20west&category=compute_instance");
    }

    #[test]
    fn empty_pairs_give_empty_string() {
        assert_eq!(build_query_string(&[]), "");
    }
}
