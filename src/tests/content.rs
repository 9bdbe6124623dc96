// Unit Tests for Page Content Helpers
//
// UNIT UNDER TEST: normalize_whitespace, hostname

use crate::content::{hostname, normalize_whitespace};

#[cfg(test)]
mod normalize_whitespace_tests {
    use super::*;

    #[test]
    fn test_collapses_layout_whitespace() {
        let text = "\n\n   Title\n\n\tFirst paragraph   with   gaps.\r\n Second.  ";
        assert_eq!(normalize_whitespace(text), "Title First paragraph with gaps. Second.");
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }

    #[test]
    fn test_placeholders_survive() {
        assert_eq!(normalize_whitespace("use  {{language}}\nhere"), "use {{language}} here");
    }
}

#[cfg(test)]
mod hostname_tests {
    use super::*;

    #[test]
    fn test_extracts_hostname() {
        assert_eq!(
            hostname("https://docs.rs/tokio/latest/tokio/?search=x#top").as_deref(),
            Some("docs.rs")
        );
    }

    #[test]
    fn test_keeps_subdomains_and_lowercases() {
        assert_eq!(hostname("https://WWW.Example.COM/a").as_deref(), Some("www.example.com"));
    }

    #[test]
    fn test_ignores_port() {
        assert_eq!(hostname("http://localhost:3000/page").as_deref(), Some("localhost"));
    }

    #[test]
    fn test_no_host() {
        assert_eq!(hostname("about:blank"), None);
        assert_eq!(hostname("not a url"), None);
    }
}
