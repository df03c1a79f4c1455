//! Geographic references for collection tasks.
//!
//! A [`Location`] can be addressed by a provider-specific id, by coordinates, by
//! name, or by postcode. Which of these a provider accepts is decided by the
//! client layer; this module only holds and validates the values.

use bon::bon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two coordinates closer than this (in degrees, per axis) are the same place.
/// 0.01 degrees is roughly one kilometre, i.e. the same city.
pub const COORDINATE_TOLERANCE: f64 = 0.01;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use weather_collector::LatLon;
///
/// let berlin_center = LatLon(52.5200, 13.4050);
/// assert_eq!(berlin_center.0, 52.5200); // Latitude
/// assert_eq!(berlin_center.1, 13.4050); // Longitude
/// assert!(berlin_center.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.0) && (-180.0..=180.0).contains(&self.1)
    }

    /// Naive per-axis comparison, see [`COORDINATE_TOLERANCE`].
    pub fn is_near(&self, other: &LatLon) -> bool {
        (self.0 - other.0).abs() < COORDINATE_TOLERANCE
            && (self.1 - other.1).abs() < COORDINATE_TOLERANCE
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Latitude {0} is outside of [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside of [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("Country code '{0}' is not a two-letter ISO 3166 code")]
    InvalidCountryCode(String),

    #[error("Coordinates need both latitude and longitude")]
    IncompleteCoordinates,
}

/// A geographic reference for a collection task.
///
/// All parts are optional. A location is *empty* when none of id, coordinates,
/// name or postcode is set; a country code on its own does not count, since it
/// only narrows down a name or postcode.
///
/// Equality is place-based: two locations that both have coordinates within
/// [`COORDINATE_TOLERANCE`] of each other are equal no matter what else differs.
/// Otherwise id, name, country code, postcode and coordinates must all match.
///
/// # Examples
///
/// ```
/// use weather_collector::{LatLon, Location};
///
/// let a = Location::builder()
///     .coordinates(LatLon(52.52, 13.40))
///     .name("Berlin")
///     .build()?;
/// let b = Location::builder().coordinates(LatLon(52.521, 13.405)).build()?;
/// assert_eq!(a, b);
/// assert!(Location::default().is_empty());
/// # Ok::<(), weather_collector::LocationError>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    id: Option<u32>,
    coordinates: Option<LatLon>,
    name: Option<String>,
    country_code: Option<String>,
    postcode: Option<String>,
}

#[bon]
impl Location {
    /// Builds a location, validating the coordinate ranges and the country code.
    ///
    /// Country codes are normalised to upper case. Empty strings are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] if latitude or longitude is out of range, or if the
    /// country code is not two ASCII letters.
    #[builder(finish_fn = build)]
    pub fn new(
        id: Option<u32>,
        coordinates: Option<LatLon>,
        #[builder(into)] name: Option<String>,
        #[builder(into)] country_code: Option<String>,
        #[builder(into)] postcode: Option<String>,
    ) -> Result<Self, LocationError> {
        if let Some(coords) = coordinates {
            if !(-90.0..=90.0).contains(&coords.0) {
                return Err(LocationError::LatitudeOutOfRange(coords.0));
            }
            if !(-180.0..=180.0).contains(&coords.1) {
                return Err(LocationError::LongitudeOutOfRange(coords.1));
            }
        }

        let country_code = match non_empty(country_code) {
            Some(code) => {
                if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(LocationError::InvalidCountryCode(code));
                }
                Some(code.to_ascii_uppercase())
            }
            None => None,
        };

        Ok(Self {
            id,
            coordinates,
            name: non_empty(name),
            country_code,
            postcode: non_empty(postcode),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl Location {
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn coordinates(&self) -> Option<LatLon> {
        self.coordinates
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }

    /// `true` iff none of id, coordinates, name or postcode is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.coordinates.is_none()
            && self.name.is_none()
            && self.postcode.is_none()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        let coordinates_match = match (self.coordinates, other.coordinates) {
            (Some(a), Some(b)) if a.is_near(&b) => return true,
            (None, None) => true,
            _ => false,
        };
        coordinates_match
            && self.id == other.id
            && self.name == other.name
            && self.country_code == other.country_code
            && self.postcode == other.postcode
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.id {
            parts.push(format!("id {}", id));
        }
        if let Some(LatLon(lat, lon)) = self.coordinates {
            parts.push(format!("lat {}, lon {}", lat, lon));
        }
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        if let Some(postcode) = &self.postcode {
            parts.push(format!("postcode {}", postcode));
        }
        if let Some(country) = &self.country_code {
            parts.push(country.clone());
        }
        if parts.is_empty() {
            write!(f, "(empty location)")
        } else {
            write!(f, "{}", parts.join("; "))
        }
    }
}

#[derive(Deserialize)]
struct RawLocation {
    id: Option<u32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    name: Option<String>,
    #[serde(alias = "country")]
    country_code: Option<String>,
    #[serde(alias = "zip")]
    postcode: Option<String>,
}

impl TryFrom<RawLocation> for Location {
    type Error = LocationError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        let coordinates = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lon)) => Some(LatLon(lat, lon)),
            (None, None) => None,
            _ => return Err(LocationError::IncompleteCoordinates),
        };
        Location::builder()
            .maybe_id(raw.id)
            .maybe_coordinates(coordinates)
            .maybe_name(raw.name)
            .maybe_country_code(raw.country_code)
            .maybe_postcode(raw.postcode)
            .build()
    }
}

impl Serialize for Location {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Location", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("latitude", &self.coordinates.map(|c| c.0))?;
        state.serialize_field("longitude", &self.coordinates.map(|c| c.1))?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("country_code", &self.country_code)?;
        state.serialize_field("postcode", &self.postcode)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> Location {
        Location::builder()
            .coordinates(LatLon(52.52, 13.405))
            .name("Berlin")
            .country_code("de")
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_location() {
        assert!(Location::default().is_empty());
        let country_only = Location::builder().country_code("NL").build().unwrap();
        assert!(country_only.is_empty());
        assert!(!berlin().is_empty());
    }

    #[test]
    fn test_country_code_normalised() {
        assert_eq!(berlin().country_code(), Some("DE"));
        assert_eq!(
            Location::builder().country_code("DEU").build().unwrap_err(),
            LocationError::InvalidCountryCode("DEU".to_string())
        );
    }

    #[test]
    fn test_coordinate_ranges() {
        assert_eq!(
            Location::builder()
                .coordinates(LatLon(90.5, 0.0))
                .build()
                .unwrap_err(),
            LocationError::LatitudeOutOfRange(90.5)
        );
        assert_eq!(
            Location::builder()
                .coordinates(LatLon(0.0, -180.1))
                .build()
                .unwrap_err(),
            LocationError::LongitudeOutOfRange(-180.1)
        );
        assert!(Location::builder()
            .coordinates(LatLon(-90.0, 180.0))
            .build()
            .is_ok());
    }

    #[test]
    fn test_nearby_coordinates_are_equal() {
        let other = Location::builder()
            .coordinates(LatLon(52.525, 13.401))
            .name("Berlin Mitte")
            .build()
            .unwrap();
        assert_eq!(berlin(), other);
    }

    #[test]
    fn test_distant_coordinates_differ() {
        let potsdam = Location::builder()
            .coordinates(LatLon(52.39, 13.06))
            .name("Berlin")
            .country_code("DE")
            .build()
            .unwrap();
        assert_ne!(berlin(), potsdam);
    }

    #[test]
    fn test_equality_without_coordinates() {
        let a = Location::builder()
            .name("Dresden")
            .country_code("DE")
            .build()
            .unwrap();
        let b = Location::builder()
            .name("Dresden")
            .country_code("de")
            .build()
            .unwrap();
        let c = Location::builder().name("Dresden").build().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, berlin());
    }

    #[test]
    fn test_deserialize_validates() {
        let location: Location =
            serde_json::from_str(r#"{"latitude": 51.05, "longitude": 13.74, "name": "Dresden"}"#)
                .unwrap();
        assert_eq!(location.coordinates(), Some(LatLon(51.05, 13.74)));
        assert!(serde_json::from_str::<Location>(r#"{"latitude": 95.0, "longitude": 0.0}"#).is_err());
    }

    #[test]
    fn test_half_coordinate_pair_is_rejected() {
        let raw = RawLocation {
            id: None,
            latitude: Some(51.05),
            longitude: None,
            name: Some("Dresden".to_string()),
            country_code: None,
            postcode: None,
        };
        assert_eq!(
            Location::try_from(raw).unwrap_err(),
            LocationError::IncompleteCoordinates
        );

        let err = serde_json::from_str::<Location>(r#"{"longitude": 13.74, "name": "Dresden"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("latitude and longitude"));

        // Serialized locations without coordinates carry explicit nulls.
        let location: Location =
            serde_json::from_str(r#"{"latitude": null, "longitude": null, "name": "Dresden"}"#)
                .unwrap();
        assert_eq!(location.coordinates(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(berlin().to_string(), "lat 52.52, lon 13.405; Berlin; DE");
        assert_eq!(Location::default().to_string(), "(empty location)");
    }
}
