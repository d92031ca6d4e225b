//! Same-domain URL filtering and link normalization

use url::Url;

/// Check whether `url` belongs to the same domain as `base_url`.
///
/// Only the network location (host and port) is compared; scheme and path
/// are ignored. URLs that fail to parse are never same-domain.
pub fn is_same_domain(url: &str, base_url: &str) -> bool {
    match (Url::parse(url), Url::parse(base_url)) {
        (Ok(url), Ok(base)) => same_authority(&url, &base),
        _ => false,
    }
}

/// Host/port comparison over already-parsed URLs
pub(crate) fn same_authority(url: &Url, base: &Url) -> bool {
    url.host_str().is_some() && url.host_str() == base.host_str() && url.port() == base.port()
}

/// Resolve `href` against the page it appeared on and strip the fragment
/// and query, yielding the canonical form used for frontier and visited-set
/// bookkeeping. Returns `None` for hrefs that cannot be resolved.
pub fn normalize_link(href: &str, current_url: &Url) -> Option<Url> {
    let mut resolved = current_url.join(href).ok()?;
    resolved.set_fragment(None);
    resolved.set_query(None);
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_domain_ignores_path_and_scheme() {
        assert!(is_same_domain(
            "https://docs.x.com/a",
            "https://docs.x.com/"
        ));
        assert!(is_same_domain(
            "http://docs.x.com/guide/install",
            "https://docs.x.com/"
        ));
    }

    #[test]
    fn test_different_host_rejected() {
        assert!(!is_same_domain("https://other.com/a", "https://docs.x.com/"));
        assert!(!is_same_domain(
            "https://sub.docs.x.com/a",
            "https://docs.x.com/"
        ));
    }

    #[test]
    fn test_different_port_rejected() {
        assert!(!is_same_domain(
            "https://docs.x.com:8443/a",
            "https://docs.x.com/"
        ));
    }

    #[test]
    fn test_unparseable_rejected() {
        assert!(!is_same_domain("not a url", "https://docs.x.com/"));
        assert!(!is_same_domain("https://docs.x.com/a", "::"));
    }

    #[test]
    fn test_normalize_strips_query_and_fragment() {
        let current = Url::parse("https://docs.x.com/").unwrap();
        let link = normalize_link("https://docs.x.com/a?x=1#frag", &current).unwrap();
        assert_eq!(link.as_str(), "https://docs.x.com/a");
    }

    #[test]
    fn test_normalize_resolves_relative() {
        let current = Url::parse("https://docs.x.com/guide/intro").unwrap();
        let link = normalize_link("../api/auth#top", &current).unwrap();
        assert_eq!(link.as_str(), "https://docs.x.com/api/auth");
    }
}
