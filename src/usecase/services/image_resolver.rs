use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_FALLBACK_IMAGE: &str = "https://i.imgur.com/1k9dY5L.png";
pub const DEFAULT_BLOCKED_HOSTS: [&str; 2] = ["placeimg.com", "via.placeholder.com"];

// Scheme followed by anything up to the first quote or closing bracket.
static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^"\]]+"#).expect("image url pattern should compile"));

/// Turns whatever a product carries in its image slot into a URL that can be
/// shown, substituting the fallback image when nothing usable is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlResolver {
    fallback: String,
    blocked_hosts: Vec<String>,
}

impl Default for ImageUrlResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_FALLBACK_IMAGE,
            DEFAULT_BLOCKED_HOSTS.iter().map(|host| host.to_string()),
        )
    }
}

impl ImageUrlResolver {
    pub fn new(fallback: impl Into<String>, blocked_hosts: impl IntoIterator<Item = String>) -> Self {
        Self {
            fallback: fallback.into(),
            blocked_hosts: blocked_hosts
                .into_iter()
                .map(|host| host.trim().trim_end_matches('.').to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn resolve(&self, raw: Option<&str>) -> String {
        let Some(found) = raw.and_then(|text| IMAGE_URL.find(text)) else {
            return self.fallback.clone();
        };
        let url = found.as_str();

        match url_host(url) {
            Some(host) if self.is_blocked(&host) => self.fallback.clone(),
            _ => url.to_string(),
        }
    }

    fn is_blocked(&self, host: &str) -> bool {
        self.blocked_hosts.iter().any(|blocked| {
            host == blocked
                || host
                    .strip_suffix(blocked.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

/// Host part of an absolute http(s) URL, lower-cased, without userinfo or port.
/// The host ends at the first character that cannot belong to a host name, so
/// trailing text glued onto a bare `scheme://host` is not part of it.
fn url_host(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest
        .split(|ch: char| matches!(ch, '/' | '?' | '#' | '\\') || ch.is_whitespace())
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host: String = host_port
        .chars()
        .take_while(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_'))
        .collect();
    let host = host.trim_end_matches('.');

    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}
