//! Reverse geocoding of a sub-point into a single display string

use crate::config::{ConfigError, GeocoderConfig};
use crate::convert::{to_decimal_degrees, DecimalDegrees};
use crate::countries::country_name;
use sattypes::prelude::{GeocodeCandidate, GeocodeResult};
use std::io;
use tracing::{debug, warn};
use url::Url;

/// The geocoder found nothing at the sub-point
pub const OVER_THE_OCEAN: &str = "Currently flying over the ocean";
/// The geocoder request failed
pub const NO_LOCATION_FOUND: &str = "No location Found";
/// The best match carried no country code
pub const NO_COUNTRY_FOUND: &str = "No location found";

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Reverse geocoder responded with status {0}")]
    Status(u16),
    #[error("Reverse geocoder transport error. {0}")]
    Transport(String),
    #[error("Reverse geocoder response could not be decoded. {0}")]
    Decode(#[from] io::Error),
}

pub trait ReverseGeocoder {
    fn reverse(
        &self,
        latitude: DecimalDegrees,
        longitude: DecimalDegrees,
    ) -> Result<GeocodeResult, GeocodeError>;
}

impl<F> ReverseGeocoder for F
where
    F: Fn(DecimalDegrees, DecimalDegrees) -> Result<GeocodeResult, GeocodeError>,
{
    fn reverse(
        &self,
        latitude: DecimalDegrees,
        longitude: DecimalDegrees,
    ) -> Result<GeocodeResult, GeocodeError> {
        self(latitude, longitude)
    }
}

/// OpenWeatherMap geocoding API, `GET /geo/1.0/reverse`
#[derive(Debug, Clone)]
pub struct OpenWeatherMapGeocoder {
    agent: ureq::Agent,
    base_url: Url,
    api_key: Option<String>,
    limit: usize,
}

impl OpenWeatherMapGeocoder {
    pub fn new(agent: ureq::Agent, base_url: Url, api_key: Option<String>, limit: usize) -> Self {
        Self {
            agent,
            base_url,
            api_key,
            limit,
        }
    }

    pub fn from_config(agent: ureq::Agent, cfg: &GeocoderConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            agent,
            cfg.base_url()?,
            cfg.api_key.clone(),
            cfg.result_limit()?,
        ))
    }

    pub fn request_url(&self, latitude: DecimalDegrees, longitude: DecimalDegrees) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("lat", &latitude.to_string());
            q.append_pair("lon", &longitude.to_string());
            q.append_pair("limit", &self.limit.to_string());
            if let Some(key) = self.api_key.as_deref() {
                q.append_pair("appid", key);
            }
        }
        url
    }
}

impl ReverseGeocoder for OpenWeatherMapGeocoder {
    fn reverse(
        &self,
        latitude: DecimalDegrees,
        longitude: DecimalDegrees,
    ) -> Result<GeocodeResult, GeocodeError> {
        let url = self.request_url(latitude, longitude);
        match self.agent.request_url("GET", &url).call() {
            Ok(resp) => Ok(resp.into_json::<GeocodeResult>()?),
            Err(ureq::Error::Status(code, _)) => Err(GeocodeError::Status(code)),
            Err(ureq::Error::Transport(t)) => Err(GeocodeError::Transport(t.to_string())),
        }
    }
}

/// Reverse geocode a sexagesimal sub-point.
///
/// Never fails, every error degrades to one of the fixed fallback strings.
pub fn reverse_geocode<G: ReverseGeocoder + ?Sized>(
    geocoder: &G,
    latitude: &str,
    longitude: &str,
) -> String {
    let (lat, long) = match (to_decimal_degrees(latitude), to_decimal_degrees(longitude)) {
        (Ok(lat), Ok(long)) => (lat, long),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Can't reverse geocode sub-point");
            return NO_LOCATION_FOUND.to_owned();
        }
    };

    match geocoder.reverse(lat, long) {
        Ok(candidates) => {
            debug!(lat = %lat, long = %long, candidates = candidates.len(), "Reverse geocoded");
            describe_location(&candidates)
        }
        Err(e) => {
            warn!(lat = %lat, long = %long, error = %e, "Reverse geocoding failed");
            NO_LOCATION_FOUND.to_owned()
        }
    }
}

/// Reduce geocoder matches to `"<country>[, <state>[, <name>]]"` using the first match.
///
/// Enrichment is chained, a place name is only appended when a state was.
pub fn describe_location(candidates: &[GeocodeCandidate]) -> String {
    let Some(best) = candidates.first() else {
        return OVER_THE_OCEAN.to_owned();
    };
    let Some(code) = best.country.as_deref() else {
        return NO_COUNTRY_FOUND.to_owned();
    };

    let code = code.to_uppercase();
    let mut location = country_name(&code).map(str::to_owned).unwrap_or(code);
    if let Some(state) = best.state.as_deref() {
        location.push_str(", ");
        location.push_str(state);
        if let Some(name) = best.name.as_deref() {
            location.push_str(", ");
            location.push_str(name);
        }
    }
    location
}
