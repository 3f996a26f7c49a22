//! Runtime configuration loaded from `VKRSS_*` environment variables

use std::fmt;

use thiserror::Error;

use crate::models::AttachmentKind;

/// Default VK API endpoint, method names are appended to it
pub const DEFAULT_API_URL: &str = "https://api.vk.com/method/";
/// Language requested for localized API fields
pub const API_LANGUAGE: &str = "ru";
/// API version sent with every call
pub const API_VERSION: &str = "5.73";

const DEFAULT_FILTER: &str = "all";
const DEFAULT_COUNT: u32 = 20;
const MAX_COUNT: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("VKRSS_COUNT must be an integer between 1 and 100, got {0:?}")]
    InvalidCount(String),
}

/// Which attachment categories are rendered into item bodies.
///
/// Each flag gates a whole category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaToggles {
    pub photos: bool,
    pub audio: bool,
    pub video: bool,
    pub documents: bool,
}

impl MediaToggles {
    pub const fn all() -> Self {
        Self {
            photos: true,
            audio: true,
            video: true,
            documents: true,
        }
    }

    /// Whether attachments of `kind` are rendered
    pub fn allows(&self, kind: AttachmentKind) -> bool {
        match kind {
            AttachmentKind::Photo => self.photos,
            AttachmentKind::Audio => self.audio,
            AttachmentKind::Video => self.video,
            AttachmentKind::Document => self.documents,
        }
    }
}

/// Validated settings for one feed.
///
/// The access token is redacted from the `Debug` output.
#[derive(Clone)]
pub struct Config {
    pub access_token: String,
    /// Group short name or id, e.g. `apiclub`
    pub domain: String,
    /// `wall.get` filter: `owner`, `others`, `all`, ...
    pub filter: String,
    /// Number of posts requested from the wall
    pub count: u32,
    pub proxy: Option<String>,
    pub toggles: MediaToggles,
    pub copyright: String,
    /// Always ends with `/`
    pub api_base_url: String,
}

impl Config {
    /// Build a config with defaults for everything but the credentials.
    pub fn new(access_token: impl Into<String>, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            access_token: access_token.into(),
            copyright: format!("vk.com/{domain}"),
            domain,
            filter: DEFAULT_FILTER.to_string(),
            count: DEFAULT_COUNT,
            proxy: None,
            toggles: MediaToggles::default(),
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Load the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the config through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. A toggle is on when its variable is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let access_token =
            get("VKRSS_ACCESS_TOKEN").ok_or(ConfigError::Missing("VKRSS_ACCESS_TOKEN"))?;
        let domain = get("VKRSS_DOMAIN").ok_or(ConfigError::Missing("VKRSS_DOMAIN"))?;

        let mut config = Self::new(access_token, domain);

        if let Some(filter) = get("VKRSS_FILTER") {
            config.filter = filter;
        }

        if let Some(raw) = get("VKRSS_COUNT") {
            config.count = match raw.trim().parse::<u32>() {
                Ok(count) if (1..=MAX_COUNT).contains(&count) => count,
                _ => return Err(ConfigError::InvalidCount(raw)),
            };
        }

        config.proxy = get("VKRSS_PROXY");

        config.toggles = MediaToggles {
            photos: get("VKRSS_NEED_IMAGES").is_some(),
            audio: get("VKRSS_NEED_AUDIOS").is_some(),
            video: get("VKRSS_NEED_VIDEOS").is_some(),
            documents: get("VKRSS_NEED_DOCS").is_some(),
        };

        if let Some(copyright) = get("VKRSS_COPYRIGHT") {
            config.copyright = copyright;
        }

        if let Some(url) = get("VKRSS_API_URL") {
            config.api_base_url = url;
        }
        if !config.api_base_url.ends_with('/') {
            config.api_base_url.push('/');
        }

        Ok(config)
    }

    /// Public page of the group, used as the feed link
    pub fn group_url(&self) -> String {
        format!("https://vk.com/{}", urlencoding::encode(&self.domain))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &"[REDACTED]")
            .field("domain", &self.domain)
            .field("filter", &self.filter)
            .field("count", &self.count)
            .field("proxy", &self.proxy)
            .field("toggles", &self.toggles)
            .field("copyright", &self.copyright)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("VKRSS_ACCESS_TOKEN", "secret"),
            ("VKRSS_DOMAIN", "apiclub"),
        ]))
        .unwrap();

        assert_eq!(config.filter, "all");
        assert_eq!(config.count, 20);
        assert_eq!(config.proxy, None);
        assert_eq!(config.toggles, MediaToggles::default());
        assert_eq!(config.copyright, "vk.com/apiclub");
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = Config::from_lookup(lookup(&[("VKRSS_DOMAIN", "apiclub")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("VKRSS_ACCESS_TOKEN")));
    }

    #[test]
    fn test_empty_domain_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("VKRSS_ACCESS_TOKEN", "secret"),
            ("VKRSS_DOMAIN", ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("VKRSS_DOMAIN")));
    }

    #[test]
    fn test_toggles_follow_presence_of_variables() {
        let config = Config::from_lookup(lookup(&[
            ("VKRSS_ACCESS_TOKEN", "secret"),
            ("VKRSS_DOMAIN", "apiclub"),
            ("VKRSS_NEED_IMAGES", "1"),
            ("VKRSS_NEED_DOCS", "yes"),
            ("VKRSS_NEED_VIDEOS", ""),
        ]))
        .unwrap();

        assert!(config.toggles.photos);
        assert!(!config.toggles.audio);
        assert!(!config.toggles.video);
        assert!(config.toggles.documents);
    }

    #[test]
    fn test_invalid_count() {
        for raw in ["abc", "0", "101"] {
            let err = Config::from_lookup(lookup(&[
                ("VKRSS_ACCESS_TOKEN", "secret"),
                ("VKRSS_DOMAIN", "apiclub"),
                ("VKRSS_COUNT", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidCount(_)), "{raw}");
        }
    }

    #[test]
    fn test_api_url_gets_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("VKRSS_ACCESS_TOKEN", "secret"),
            ("VKRSS_DOMAIN", "apiclub"),
            ("VKRSS_API_URL", "http://127.0.0.1:8080"),
            ("VKRSS_PROXY", "socks5://127.0.0.1:9050"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:9050"));
    }

    #[test]
    fn test_debug_hides_token() {
        let config = Config::new("super-secret-token", "apiclub");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("apiclub"));
    }
}
