use crate::position::PositionSample;
use serde::{Deserialize, Serialize};

pub type SatelliteId = u64;

/// Satellite identity as reported alongside a TLE
#[derive(Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
pub struct SatelliteInfo {
    pub satid: SatelliteId,
    pub satname: String,
}

/// TLE lookup response, `tle` holds `"<line1>\r\n<line2>"`.
///
/// An empty `tle` is a valid answer meaning there's no element set for the satellite.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Deserialize, Serialize)]
pub struct TlePayload {
    #[serde(default)]
    pub tle: String,
    pub info: SatelliteInfo,
}

impl TlePayload {
    pub fn has_tle(&self) -> bool {
        !self.tle.is_empty()
    }
}

/// The unit handed to the presentation layer
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct DisplayRecord {
    pub id: SatelliteId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub position: Option<PositionSample>,
}

impl DisplayRecord {
    pub fn identity(info: &SatelliteInfo) -> Self {
        Self {
            id: info.satid,
            name: info.satname.clone(),
            image_url: None,
            location: None,
            position: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Sexagesimal;

    #[test]
    fn payload_from_json() {
        let p: TlePayload = serde_json::from_str(
            r#"{"info":{"satid":25544,"satname":"SPACE STATION","transactionscount":3},"tle":""}"#,
        )
        .unwrap();
        assert_eq!(p.info.satid, 25544);
        assert_eq!(p.info.satname, "SPACE STATION");
        assert!(!p.has_tle());
    }

    #[test]
    fn identity_only_record_omits_optional_fields() {
        let rec = DisplayRecord::identity(&SatelliteInfo {
            satid: 20580,
            satname: "HST".to_owned(),
        });
        let v = serde_json::to_value(&rec).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["id"], 20580);
        assert_eq!(obj["name"], "HST");
    }

    #[test]
    fn position_fields_are_flattened() {
        let mut rec = DisplayRecord::identity(&SatelliteInfo {
            satid: 25544,
            satname: "ISS (ZARYA)".to_owned(),
        });
        rec.location = Some("Brazil".to_owned());
        rec.position = Some(PositionSample {
            sub_latitude: Sexagesimal::from_degrees(-10.25),
            sub_longitude: Sexagesimal::from_degrees(-50.5),
            latitude: -10.25,
            longitude: -50.5,
            elevation_km: 417.6,
            ground_speed_kmps: 7.18,
        });
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["lat"], "-10:15:00.0");
        assert_eq!(v["long"], "-50:30:00.0");
        assert_eq!(v["elevation"], "418");
        assert_eq!(v["ground_speed"], 7.18);
        assert_eq!(v["location"], "Brazil");
        assert!(v.get("image_url").is_none());
    }
}
