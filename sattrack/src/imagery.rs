//! Picture URL for a satellite name

use crate::config::{ConfigError, ImageryConfig};
use serde::Deserialize;
use std::io;
use tracing::{debug, warn};
use url::Url;

/// Hand-picked images, keyed by trimmed and upper-cased satellite name
pub const CURATED_IMAGES: &[(&str, &str)] = &[
    ("HST", "https://upload.wikimedia.org/wikipedia/commons/3/3f/HST-SM4.jpeg"),
    (
        "ISS (ZARYA)",
        "https://ichef.bbci.co.uk/ace/standard/3840/cpsprodpb/e7e2/live/bea2c100-3539-11ef-a647-6fc50b20e53e.jpg",
    ),
];

#[derive(Debug, thiserror::Error)]
pub enum ImageryError {
    #[error("Image search responded with status {0}")]
    Status(u16),
    #[error("Image search transport error. {0}")]
    Transport(String),
    #[error("Image search response could not be decoded. {0}")]
    Decode(#[from] io::Error),
}

pub trait ImageSearch {
    /// Link to the best matching image, if any
    fn first_image(&self, query: &str) -> Result<Option<String>, ImageryError>;
}

impl<F> ImageSearch for F
where
    F: Fn(&str) -> Result<Option<String>, ImageryError>,
{
    fn first_image(&self, query: &str) -> Result<Option<String>, ImageryError> {
        self(query)
    }
}

/// Google Programmable Search, image mode
#[derive(Debug, Clone)]
pub struct GoogleImageSearch {
    agent: ureq::Agent,
    base_url: Url,
    api_key: String,
    search_engine_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

impl GoogleImageSearch {
    pub fn new(
        agent: ureq::Agent,
        base_url: Url,
        api_key: String,
        search_engine_id: String,
    ) -> Self {
        Self {
            agent,
            base_url,
            api_key,
            search_engine_id,
        }
    }

    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("cx", &self.search_engine_id)
            .append_pair("key", &self.api_key)
            .append_pair("searchType", "image")
            .append_pair("num", "1");
        url
    }
}

impl ImageSearch for GoogleImageSearch {
    fn first_image(&self, query: &str) -> Result<Option<String>, ImageryError> {
        let url = self.request_url(query);
        match self.agent.request_url("GET", &url).call() {
            Ok(resp) => {
                let body: SearchResponse = resp.into_json()?;
                Ok(body.items.into_iter().next().map(|i| i.link))
            }
            Err(ureq::Error::Status(code, _)) => Err(ImageryError::Status(code)),
            Err(ureq::Error::Transport(t)) => Err(ImageryError::Transport(t.to_string())),
        }
    }
}

pub fn curated_image(satname: &str) -> Option<&'static str> {
    let key = satname.trim().to_uppercase();
    CURATED_IMAGES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, url)| *url)
}

/// Curated image first, then the search service, then the default image
#[derive(Debug, Clone)]
pub struct SatelliteImagery<S> {
    search: Option<S>,
    default_image_url: Url,
}

impl SatelliteImagery<GoogleImageSearch> {
    /// Search is only enabled when both the API key and the search engine id are set
    pub fn from_config(agent: ureq::Agent, cfg: &ImageryConfig) -> Result<Self, ConfigError> {
        let search = match (cfg.api_key.clone(), cfg.search_engine_id.clone()) {
            (Some(key), Some(cx)) => Some(GoogleImageSearch::new(agent, cfg.base_url()?, key, cx)),
            _ => None,
        };
        Ok(Self::new(search, cfg.default_image_url()?))
    }
}

impl<S: ImageSearch> SatelliteImagery<S> {
    /// Without a search service every uncurated name gets the default image
    pub fn new(search: Option<S>, default_image_url: Url) -> Self {
        Self {
            search,
            default_image_url,
        }
    }

    pub fn image_url(&self, satname: &str) -> String {
        if let Some(url) = curated_image(satname) {
            return url.to_owned();
        }

        let Some(search) = self.search.as_ref() else {
            debug!(satname, "Image search not configured");
            return self.default_image_url.to_string();
        };

        let query = format!("{} satellite", satname.trim().to_uppercase());
        match search.first_image(&query) {
            Ok(Some(link)) => link,
            Ok(None) => {
                debug!(query = %query, "No image found");
                self.default_image_url.to_string()
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Image search failed");
                self.default_image_url.to_string()
            }
        }
    }
}
