//! Format predicates backing the string format checks.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern")
});

static CUID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[cC][^\s-]{8,}$").expect("cuid pattern"));

static CUID2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][0-9a-z]+$").expect("cuid2 pattern"));

static ULID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-HJKMNP-TV-Za-hjkmnp-tv-z]{26}$").expect("ulid pattern")
});

pub(crate) fn is_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

pub(crate) fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

pub(crate) fn is_uuid(s: &str) -> bool {
    uuid::Uuid::parse_str(s).is_ok()
}

pub(crate) fn is_cuid(s: &str) -> bool {
    CUID.is_match(s)
}

pub(crate) fn is_cuid2(s: &str) -> bool {
    CUID2.is_match(s)
}

pub(crate) fn is_ulid(s: &str) -> bool {
    ULID.is_match(s)
}

pub(crate) fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

pub(crate) fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_email("a.user+tag@example.co"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("user@"));
    }

    #[test]
    fn test_uuid() {
        assert!(is_uuid("67e55044-10b1-426f-9247-bb680e5fe0c8"));
        assert!(!is_uuid("67e55044"));
    }

    #[test]
    fn test_url() {
        assert!(is_url("https://example.com/path?q=1"));
        assert!(!is_url("://missing-scheme"));
    }

    #[test]
    fn test_ip_addresses() {
        assert!(is_ipv4("192.168.0.1"));
        assert!(!is_ipv4("999.0.0.1"));
        assert!(is_ipv6("::1"));
        assert!(!is_ipv6("::zz"));
    }

    #[test]
    fn test_ulid() {
        assert!(is_ulid("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert!(!is_ulid("01ARZ3NDEKTSV4RRFFQ69G5FA"));
    }
}
