//! Video URL scanning and classification
//!
//! Candidate URLs are located with a permissive HTTP(S) pattern, then kept only when
//! their host contains one of the allowlisted video-platform domains. Containment is
//! a plain substring test, so `notyoutube.com.evil.test` is accepted as `youtube.com`.

use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// Hosts (or host fragments) treated as video platforms.
pub const VIDEO_DOMAINS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "twitter.com",
    "x.com",
    "vimeo.com",
    "tiktok.com",
    "instagram.com",
    "facebook.com",
    "fb.watch",
    "twitch.tv",
    "dailymotion.com",
    "nicovideo.jp",
    "bilibili.com",
    "reddit.com",
    "streamable.com",
    "clips.twitch.tv",
    "video.twimg.com",
];

const URL_PATTERN: &str =
    r"(?i)https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9]{1,6}\b[-a-zA-Z0-9@:%_+.~#?&/=]*";

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"))
}

/// Ordered, immutable set of domain patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAllowlist {
    patterns: Vec<String>,
}

impl DomainAllowlist {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The built-in video platform list
    pub fn builtin() -> Self {
        Self::new(VIDEO_DOMAINS)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `host` contains any pattern (case-insensitive substring match)
    pub fn matches(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.patterns.iter().any(|p| host.contains(p.as_str()))
    }
}

impl Default for DomainAllowlist {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Authority segment of `url`: everything between `scheme://` and the first `/`, `?` or `#`.
pub fn host_of(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once("://")?;

    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return None;
    }

    let end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let host = &rest[..end];

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Lower-case a host and drop one leading `www.`
pub fn normalize_host(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

#[derive(Debug, Clone)]
pub struct UrlScanner {
    regex: Regex,
    allowlist: DomainAllowlist,
}

impl UrlScanner {
    pub fn new(allowlist: DomainAllowlist) -> Self {
        Self {
            regex: url_regex().clone(),
            allowlist,
        }
    }

    pub fn allowlist(&self) -> &DomainAllowlist {
        &self.allowlist
    }

    /// Video URLs in `text`, in order of appearance, repeats kept.
    pub fn scan(&self, text: &str) -> Vec<String> {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|candidate| {
                let keep = self.is_video_url(candidate);
                trace!("candidate {} -> {}", candidate, keep);
                keep
            })
            .map(String::from)
            .collect()
    }

    /// Classify a single URL. Anything without a parseable host is rejected.
    pub fn is_video_url(&self, url: &str) -> bool {
        match host_of(url) {
            Some(host) => self.allowlist.matches(&normalize_host(host)),
            None => false,
        }
    }
}

impl Default for UrlScanner {
    fn default() -> Self {
        Self::new(DomainAllowlist::builtin())
    }
}

fn default_scanner() -> &'static UrlScanner {
    static SCANNER: OnceLock<UrlScanner> = OnceLock::new();
    SCANNER.get_or_init(UrlScanner::default)
}

/// Scan `text` with the built-in allowlist
pub fn scan(text: &str) -> Vec<String> {
    default_scanner().scan(text)
}

/// Check `url` against the built-in allowlist
pub fn is_video_url(url: &str) -> bool {
    default_scanner().is_video_url(url)
}
