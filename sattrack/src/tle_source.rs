//! Where TLE lookup payloads come from

use crate::config::{ConfigError, N2yoConfig};
use satproto::{parse_tle_set, TLE_LINE_DELIMITER};
use sattypes::prelude::*;
use std::{fs, io, path::Path};
use tracing::{debug, info};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TleSourceError {
    #[error("TLE source responded with status {0}")]
    Status(u16),
    #[error("TLE source transport error. {0}")]
    Transport(String),
    #[error("TLE source I/O error. {0}")]
    Io(#[from] io::Error),
    #[error("Malformed TLE set, unparsed content starts at '{0}'")]
    TleSet(String),
}

pub trait TleSource {
    fn tle_payload(&self, id: SatelliteId) -> Result<TlePayload, TleSourceError>;
}

/// N2YO REST API, `GET {base}/tle/{id}&apiKey={key}`
#[derive(Debug, Clone)]
pub struct N2yoClient {
    agent: ureq::Agent,
    base_url: Url,
    api_key: Option<String>,
}

impl N2yoClient {
    pub fn new(agent: ureq::Agent, base_url: Url, api_key: Option<String>) -> Self {
        Self {
            agent,
            base_url,
            api_key,
        }
    }

    pub fn from_config(agent: ureq::Agent, cfg: &N2yoConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(agent, cfg.base_url()?, cfg.api_key.clone()))
    }

    /// N2YO takes the key appended to the path with `&`, not as a query string
    pub fn request_url(&self, id: SatelliteId) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        match self.api_key.as_deref() {
            Some(key) => format!("{base}/tle/{id}&apiKey={key}"),
            None => format!("{base}/tle/{id}"),
        }
    }
}

impl TleSource for N2yoClient {
    fn tle_payload(&self, id: SatelliteId) -> Result<TlePayload, TleSourceError> {
        let url = self.request_url(id);
        debug!(satid = id, "Requesting TLE");
        match self.agent.get(&url).call() {
            Ok(resp) => Ok(resp.into_json::<TlePayload>()?),
            Err(ureq::Error::Status(code, _)) => Err(TleSourceError::Status(code)),
            Err(ureq::Error::Transport(t)) => Err(TleSourceError::Transport(t.to_string())),
        }
    }
}

/// Serves payloads from a local TLE set file, keyed by catalog number
#[derive(Debug, Clone, Default)]
pub struct TleSetSource {
    tle_set: Vec<Tle>,
}

impl TleSetSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TleSourceError> {
        let content = fs::read_to_string(path.as_ref())?;
        let src = Self::from_str_checked(&content)?;
        info!(
            path = %path.as_ref().display(),
            entries = src.tle_set.len(),
            "Loaded TLE set"
        );
        Ok(src)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, TleSourceError> {
        let (rest, tle_set) =
            parse_tle_set(s).map_err(|e| TleSourceError::TleSet(e.to_string()))?;
        if !rest.trim().is_empty() {
            let excerpt: String = rest.trim_start().chars().take(32).collect();
            return Err(TleSourceError::TleSet(excerpt));
        }
        Ok(Self { tle_set })
    }

    pub fn tle_set(&self) -> &[Tle] {
        &self.tle_set
    }
}

impl TleSource for TleSetSource {
    /// An unknown catalog number yields a payload without TLE, the same as N2YO does
    fn tle_payload(&self, id: SatelliteId) -> Result<TlePayload, TleSourceError> {
        let payload = match self
            .tle_set
            .iter()
            .find(|t| t.catalog_number() == Some(id))
        {
            Some(tle) => TlePayload {
                tle: format!("{}{}{}", tle.line1, TLE_LINE_DELIMITER, tle.line2),
                info: SatelliteInfo {
                    satid: id,
                    satname: tle.name.clone(),
                },
            },
            None => TlePayload {
                tle: String::new(),
                info: SatelliteInfo {
                    satid: id,
                    satname: id.to_string(),
                },
            },
        };
        Ok(payload)
    }
}
