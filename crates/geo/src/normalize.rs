//! Coordinate normalization.
//!
//! Form input arrives as decimal numbers, decimal strings, or
//! degree-minute-second strings such as `40°26'30.5"N`. Everything is turned
//! into signed decimal degrees or rejected with `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Plain decimal number, optionally signed. Exponents, `inf` and `NaN` are
/// not accepted even though `f64::from_str` would take them.
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)$").expect("decimal pattern is valid")
});

/// Degrees (`°` or back-tick), optional minutes (`'` or `′`), optional
/// seconds (`"`, `″` or `''`), then a hemisphere letter.
static DMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(\d+(?:\.\d+)?)\s*[°`]\s*",
        r"(?:(\d+(?:\.\d+)?)\s*['′]\s*)?",
        r#"(?:(\d+(?:\.\d+)?)\s*(?:"|″|'')\s*)?"#,
        r"([NSEWnsew])$",
    ))
    .expect("dms pattern is valid")
});

/// Which coordinate is being normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Valid range [-90, 90], hemispheres `N`/`S`
    Latitude,
    /// Valid range [-180, 180], hemispheres `E`/`W`
    Longitude,
}

impl Axis {
    /// Largest magnitude allowed on this axis.
    #[inline]
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Sign for a hemisphere letter, `None` if the letter belongs to the
    /// other axis.
    fn hemisphere_sign(self, letter: char) -> Option<f64> {
        match (self, letter.to_ascii_uppercase()) {
            (Axis::Latitude, 'N') | (Axis::Longitude, 'E') => Some(1.0),
            (Axis::Latitude, 'S') | (Axis::Longitude, 'W') => Some(-1.0),
            _ => None,
        }
    }

    #[inline]
    fn contains(self, value: f64) -> bool {
        value.is_finite() && value.abs() <= self.limit()
    }
}

/// Normalize a JSON value (number or string) into decimal degrees.
///
/// Returns `None` for anything that is not a coordinate on `axis`.
pub fn normalize(value: &Value, axis: Axis) -> Option<f64> {
    match value {
        Value::Number(n) => normalize_number(n.as_f64()?, axis),
        Value::String(s) => normalize_str(s, axis),
        _ => None,
    }
}

/// Accept a number already in decimal degrees if it is in range.
#[inline]
pub fn normalize_number(value: f64, axis: Axis) -> Option<f64> {
    axis.contains(value).then_some(value)
}

/// Parse a decimal or degree-minute-second string into decimal degrees.
///
/// ```
/// use fifthworld_geo::{normalize_str, Axis};
///
/// let lon = normalize_str("80°00'46.0\"W", Axis::Longitude).unwrap();
/// assert!((lon + 80.012778).abs() < 1e-3);
/// assert_eq!(normalize_str("80°00'46.0\"N", Axis::Longitude), None);
/// ```
pub fn normalize_str(raw: &str, axis: Axis) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if DECIMAL.is_match(raw) {
        return raw.parse::<f64>().ok().and_then(|v| normalize_number(v, axis));
    }

    let caps = DMS.captures(raw)?;
    let part = |i: usize| -> Option<f64> {
        caps.get(i).map_or(Some(0.0), |m| m.as_str().parse().ok())
    };

    let degrees = part(1)?;
    let minutes = part(2)?;
    let seconds = part(3)?;
    if minutes >= 60.0 || seconds >= 60.0 {
        return None;
    }

    let letter = caps.get(4)?.as_str().chars().next()?;
    let sign = axis.hemisphere_sign(letter)?;

    let value = sign * (degrees + minutes / 60.0 + seconds / 3600.0);
    normalize_number(value, axis)
}
