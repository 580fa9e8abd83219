use crate::geocoder::{reverse_geocode, ReverseGeocoder};
use crate::propagator::{propagate, PropagationError};
use satproto::parse_tle_lines;
use sattypes::prelude::*;
use tracing::debug;

/// Turns a TLE lookup payload into a [`DisplayRecord`]
#[derive(Debug, Clone)]
pub struct SatelliteViewBuilder<G> {
    geocoder: G,
}

impl<G: ReverseGeocoder> SatelliteViewBuilder<G> {
    pub fn new(geocoder: G) -> Self {
        Self { geocoder }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn build_display_record(
        &self,
        image_url: Option<&str>,
        payload: &TlePayload,
    ) -> Result<DisplayRecord, PropagationError> {
        self.build_display_record_at(image_url, payload, chrono::Utc::now())
    }

    /// Propagation and geocoding are skipped entirely when the payload has no TLE
    pub fn build_display_record_at(
        &self,
        image_url: Option<&str>,
        payload: &TlePayload,
        at: UtcTimestamp,
    ) -> Result<DisplayRecord, PropagationError> {
        let mut record = DisplayRecord::identity(&payload.info);
        record.image_url = image_url.map(str::to_owned);

        if !payload.has_tle() {
            debug!(satid = payload.info.satid, "No TLE available");
            return Ok(record);
        }

        let tle = payload_tle(payload)?;
        let sample = propagate(&tle, at)?;
        let location = reverse_geocode(
            &self.geocoder,
            &sample.sub_latitude.to_string(),
            &sample.sub_longitude.to_string(),
        );

        record.location = Some(location);
        record.position = Some(sample);
        Ok(record)
    }
}

fn payload_tle(payload: &TlePayload) -> Result<Tle, PropagationError> {
    let (_, (line1, line2)) =
        parse_tle_lines(&payload.tle).map_err(|e| PropagationError::InvalidTle {
            name: payload.info.satname.clone(),
            reason: e.to_string(),
        })?;
    Ok(Tle::new(payload.info.satname.as_str(), line1, line2))
}
