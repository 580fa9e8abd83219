use serde::Deserialize;
use std::{env, fs, io, path::Path, time::Duration};
use tracing::info;
use url::Url;

pub const N2YO_BASE_URL_DEFAULT: &str = "https://api.n2yo.com/rest/v1/satellite/";
pub const GEOCODER_BASE_URL_DEFAULT: &str = "https://api.openweathermap.org/geo/1.0/reverse";
pub const IMAGERY_BASE_URL_DEFAULT: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_IMAGE_URL: &str =
    "https://wmo.int/sites/default/files/2023-03/AdobeStock_580430822.jpeg";
pub const RESULT_LIMIT_DEFAULT: usize = 5;
pub const HTTP_TIMEOUT_DEFAULT: &str = "10s";

pub const N2YO_API_KEY_ENV_VAR: &str = "N2YO_API_KEY";
pub const N2YO_API_KEY_LEGACY_ENV_VAR: &str = "API_KEY";
pub const GEOCODER_API_KEY_ENV_VAR: &str = "WEATHER_API_KEY";
pub const IMAGERY_API_KEY_ENV_VAR: &str = "GOOGLE_API_KEY";
pub const IMAGERY_SEARCH_ENGINE_ID_ENV_VAR: &str = "GOOGLE_CX";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Io(#[from] io::Error),
    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid HTTP timeout '{0}'")]
    Timeout(String, #[source] humantime::DurationError),
    #[error("The geocoder result-limit must be at least 1")]
    InvalidResultLimit,
    #[error("Invalid default base URL")]
    Url(#[from] url::ParseError),
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub n2yo: N2yoConfig,
    pub geocoder: GeocoderConfig,
    pub imagery: ImageryConfig,
    pub http: HttpConfig,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct N2yoConfig {
    pub base_url: Option<Url>,
    pub api_key: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeocoderConfig {
    pub base_url: Option<Url>,
    pub api_key: Option<String>,
    pub result_limit: Option<usize>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImageryConfig {
    pub base_url: Option<Url>,
    pub api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub default_image_url: Option<Url>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Overall request timeout, e.g. "10s" or "1m 30s"
    pub timeout: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let cfg = Self::from_str_checked(&content)?;
        info!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(cfg)
    }

    /// Loads `path` when given, otherwise starts from the defaults.
    /// Environment secrets are applied on top either way.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        cfg.apply_env(|var| env::var(var).ok());
        Ok(cfg)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;
        cfg.http.timeout()?;
        cfg.geocoder.result_limit()?;
        Ok(cfg)
    }

    /// Environment variables take precedence over the file
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| var(name).filter(|v| !v.is_empty());

        if let Some(key) =
            lookup(N2YO_API_KEY_ENV_VAR).or_else(|| lookup(N2YO_API_KEY_LEGACY_ENV_VAR))
        {
            self.n2yo.api_key = Some(key);
        }
        if let Some(key) = lookup(GEOCODER_API_KEY_ENV_VAR) {
            self.geocoder.api_key = Some(key);
        }
        if let Some(key) = lookup(IMAGERY_API_KEY_ENV_VAR) {
            self.imagery.api_key = Some(key);
        }
        if let Some(cx) = lookup(IMAGERY_SEARCH_ENGINE_ID_ENV_VAR) {
            self.imagery.search_engine_id = Some(cx);
        }
    }
}

impl N2yoConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        or_default_url(&self.base_url, N2YO_BASE_URL_DEFAULT)
    }
}

impl GeocoderConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        or_default_url(&self.base_url, GEOCODER_BASE_URL_DEFAULT)
    }

    pub fn result_limit(&self) -> Result<usize, ConfigError> {
        match self.result_limit {
            Some(0) => Err(ConfigError::InvalidResultLimit),
            Some(n) => Ok(n),
            None => Ok(RESULT_LIMIT_DEFAULT),
        }
    }
}

impl ImageryConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        or_default_url(&self.base_url, IMAGERY_BASE_URL_DEFAULT)
    }

    pub fn default_image_url(&self) -> Result<Url, ConfigError> {
        or_default_url(&self.default_image_url, DEFAULT_IMAGE_URL)
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        let t = self.timeout.as_deref().unwrap_or(HTTP_TIMEOUT_DEFAULT);
        humantime::parse_duration(t).map_err(|e| ConfigError::Timeout(t.to_owned(), e))
    }

    /// Blocking HTTP agent shared by every external client
    pub fn agent(&self) -> Result<ureq::Agent, ConfigError> {
        Ok(ureq::AgentBuilder::new()
            .timeout(self.timeout()?)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build())
    }
}

fn or_default_url(url: &Option<Url>, default: &str) -> Result<Url, ConfigError> {
    match url {
        Some(u) => Ok(u.clone()),
        None => Ok(Url::parse(default)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::collections::HashMap;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = Config::from_str_checked("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.http.timeout().unwrap(), Duration::from_secs(10));
        assert_eq!(cfg.geocoder.result_limit().unwrap(), 5);
        assert_eq!(cfg.n2yo.base_url().unwrap().as_str(), N2YO_BASE_URL_DEFAULT);
        assert_eq!(
            cfg.geocoder.base_url().unwrap().as_str(),
            GEOCODER_BASE_URL_DEFAULT
        );
        assert_eq!(
            cfg.imagery.default_image_url().unwrap().as_str(),
            DEFAULT_IMAGE_URL
        );
    }

    #[test]
    fn full_config() {
        const TOML: &str = indoc! {r#"
            [n2yo]
            base-url = 'http://localhost:8080/n2yo/'
            api-key = 'n2yo-key'

            [geocoder]
            api-key = 'owm-key'
            result-limit = 1

            [imagery]
            api-key = 'google-key'
            search-engine-id = 'cx'
            default-image-url = 'https://example.com/sat.png'

            [http]
            timeout = '1m 30s'
        "#};
        let cfg = Config::from_str_checked(TOML).unwrap();
        assert_eq!(
            cfg.n2yo.base_url().unwrap().as_str(),
            "http://localhost:8080/n2yo/"
        );
        assert_eq!(cfg.n2yo.api_key.as_deref(), Some("n2yo-key"));
        assert_eq!(cfg.geocoder.api_key.as_deref(), Some("owm-key"));
        assert_eq!(cfg.geocoder.result_limit().unwrap(), 1);
        assert_eq!(cfg.imagery.search_engine_id.as_deref(), Some("cx"));
        assert_eq!(
            cfg.imagery.default_image_url().unwrap().as_str(),
            "https://example.com/sat.png"
        );
        assert_eq!(cfg.http.timeout().unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_str_checked("[http]\ntimeout = 'soon'"),
            Err(ConfigError::Timeout(..))
        ));
        assert!(matches!(
            Config::from_str_checked("[geocoder]\nresult-limit = 0"),
            Err(ConfigError::InvalidResultLimit)
        ));
        assert!(matches!(
            Config::from_str_checked("[n2yo]\nbase-url = 'not a url'"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn env_overrides_file() {
        const TOML: &str = indoc! {r#"
            [n2yo]
            api-key = 'from-file'
            [geocoder]
            api-key = 'from-file'
        "#};
        let env: HashMap<&str, &str> = [
            ("API_KEY", "legacy"),
            ("WEATHER_API_KEY", "owm"),
            ("GOOGLE_API_KEY", "google"),
            ("GOOGLE_CX", ""),
        ]
        .into_iter()
        .collect();
        let mut cfg = Config::from_str_checked(TOML).unwrap();
        cfg.apply_env(|v| env.get(v).map(|s| s.to_string()));
        assert_eq!(cfg.n2yo.api_key.as_deref(), Some("legacy"));
        assert_eq!(cfg.geocoder.api_key.as_deref(), Some("owm"));
        assert_eq!(cfg.imagery.api_key.as_deref(), Some("google"));
        assert_eq!(cfg.imagery.search_engine_id, None);

        let mut cfg = Config::default();
        cfg.apply_env(|v| match v {
            "N2YO_API_KEY" => Some("current".to_owned()),
            "API_KEY" => Some("legacy".to_owned()),
            _ => None,
        });
        assert_eq!(cfg.n2yo.api_key.as_deref(), Some("current"));
    }
}
