//! Query-string parameter extraction.
//!
//! Requests carry their parameters as a raw key/value multimap. The
//! functions here turn the ones a query needs into typed values, failing as a
//! whole when any of them is missing or malformed so that no store query is
//! issued for a bad request.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{LocaError, Result};

/// Parameters every bounding-box query requires, in the order they are named
/// in error messages.
pub const AREA_PARAMS: &[&str] = &["lat0", "lat1", "lon0", "lon1", "mPerPix"];

/// Look up the first value for `name`, mirroring how form values are read.
fn first_value<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Parse every parameter in `required` as a 64-bit float.
///
/// The operation is all-or-nothing: the first missing or non-numeric value
/// aborts the extraction with [`LocaError::InvalidParameter`]. Values are
/// neither clamped nor reordered, so `inf` and `NaN` pass through as floats.
///
/// # Example
///
/// ```
/// use loca::params::extract_floats;
///
/// let pairs = vec![("a".to_string(), "1.5".to_string())];
/// let values = extract_floats(&["a"], &pairs).unwrap();
/// assert_eq!(values["a"], 1.5);
/// ```
pub fn extract_floats(
    required: &'static [&'static str],
    pairs: &[(String, String)],
) -> Result<HashMap<&'static str, f64>> {
    let mut values = HashMap::with_capacity(required.len());

    for &name in required {
        let value = first_value(pairs, name)
            .and_then(|raw| raw.parse::<f64>().ok())
            .ok_or_else(|| LocaError::InvalidParameter {
                name: name.to_string(),
                required,
            })?;
        values.insert(name, value);
    }

    Ok(values)
}

/// A geographic area and display resolution requested by a map client.
///
/// The bounds are exclusive on both axes. `lat0 < lat1` and `lon0 < lon1` are
/// not enforced: reversed bounds simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBoxQuery {
    /// First latitude bound in decimal degrees.
    pub lat0: f64,
    /// Second latitude bound in decimal degrees.
    pub lat1: f64,
    /// First longitude bound in decimal degrees.
    pub lon0: f64,
    /// Second longitude bound in decimal degrees.
    pub lon1: f64,
    /// Map resolution in meters per pixel, used to select the display range tier.
    pub m_per_pix: f64,
}

impl BoundingBoxQuery {
    /// Create a query from already validated values.
    pub fn new(lat0: f64, lat1: f64, lon0: f64, lon1: f64, m_per_pix: f64) -> Self {
        Self {
            lat0,
            lat1,
            lon0,
            lon1,
            m_per_pix,
        }
    }

    /// Extract `lat0`, `lat1`, `lon0`, `lon1` and `mPerPix` from query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        let values = extract_floats(AREA_PARAMS, pairs)?;

        Ok(Self {
            lat0: values["lat0"],
            lat1: values["lat1"],
            lon0: values["lon0"],
            lon1: values["lon1"],
            m_per_pix: values["mPerPix"],
        })
    }

    /// Whether a coordinate lies strictly inside the box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat > self.lat0 && lat < self.lat1 && lon > self.lon0 && lon < self.lon1
    }
}

/// Identifier of a trip, as carried in request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(i32);

impl TripId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl FromStr for TripId {
    type Err = LocaError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<i32>()
            .map(TripId)
            .map_err(|_| LocaError::InvalidTripId {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
