//! Email address grammar.

use regex::Regex;
use std::sync::OnceLock;

/// Longest address accepted, in bytes.
const MAX_EMAIL_LEN: usize = 254;

/// Longest local part accepted, in bytes.
const MAX_LOCAL_LEN: usize = 64;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        // WHATWG valid-email grammar, with at least one dot in the domain.
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("valid regex")
    })
}

/// Checks an address against the email grammar.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN {
        return false;
    }
    match email.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_LEN => pattern().is_match(email),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        for email in [
            "alice@example.com",
            "first.last+tag@sub.example.co.uk",
            "o'brien@example.ie",
            "x@a-b.io",
        ] {
            assert!(is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn test_invalid_addresses() {
        for email in [
            "",
            "alice",
            "alice@",
            "@example.com",
            "alice@localhost",
            "alice@@example.com",
            "alice@-example.com",
            "alice@example..com",
            "ali ce@example.com",
        ] {
            assert!(!is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn test_length_limits() {
        let local = "a".repeat(65);
        assert!(!is_valid_email(&format!("{local}@example.com")));

        let domain = format!("{}.com", "a".repeat(250));
        assert!(!is_valid_email(&format!("a@{domain}")));
    }
}
