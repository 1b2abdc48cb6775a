//! Shared utility functions for the contest service

/// Parse an environment variable into a type implementing FromStr, with a default fallback
pub fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read an environment variable, treating empty values as unset.
pub fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_to_default() {
        assert_eq!(env_parse("CONTEST_TEST_UNSET_VAR", 3000u16), 3000);
    }

    #[test]
    fn env_nonempty_filters_empty_values() {
        std::env::set_var("CONTEST_TEST_EMPTY_VAR", "");
        assert_eq!(env_nonempty("CONTEST_TEST_EMPTY_VAR"), None);
        std::env::set_var("CONTEST_TEST_EMPTY_VAR", "value");
        assert_eq!(
            env_nonempty("CONTEST_TEST_EMPTY_VAR").as_deref(),
            Some("value")
        );
    }
}
