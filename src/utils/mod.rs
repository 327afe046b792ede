//! Utility functions and helpers.

pub mod http;
pub mod log;
pub mod retry;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://soccer365.ru/").unwrap();
        assert_eq!(
            resolve_url(&base, "competitions/13/history/"),
            "https://soccer365.ru/competitions/13/history/"
        );
        assert_eq!(
            resolve_url(&base, "/competitions/13/2023-2024/"),
            "https://soccer365.ru/competitions/13/2023-2024/"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }
}
