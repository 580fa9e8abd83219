use serde::Deserialize;

/// A single reverse-geocoding match.
///
/// Every field is optional, a missing key and an explicit `null` are the same thing.
#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
pub struct GeocodeCandidate {
    /// ISO 3166-1 alpha-2 country code
    #[serde(default)]
    pub country: Option<String>,
    /// State or region
    #[serde(default)]
    pub state: Option<String>,
    /// Place name
    #[serde(default)]
    pub name: Option<String>,
}

impl GeocodeCandidate {
    pub fn new(country: Option<&str>, state: Option<&str>, name: Option<&str>) -> Self {
        Self {
            country: country.map(str::to_owned),
            state: state.map(str::to_owned),
            name: name.map(str::to_owned),
        }
    }
}

pub type GeocodeResult = Vec<GeocodeCandidate>;
