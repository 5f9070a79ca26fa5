use std::sync::LazyLock;

use regex::Regex;

use super::{field::DecodedField, tags::ExifGroup};
use crate::{
    error::DecodeError,
    values::{decode_rational, URational},
    FieldValue,
};

/// `<deg> <min> <sec> [N|S|E|W]`, separated by whitespace, commas or the
/// usual `° ' "` marks.
static DMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?<deg>\d+(?:\.\d+)?)[\s,°'"]+(?<min>\d+(?:\.\d+)?)[\s,°'"]+(?<sec>\d+(?:\.\d+)?)[\s,°'"]*(?<hemi>[NSEWnsew])?\s*$"#,
    )
    .expect("DMS pattern is valid")
});

/// (reference tag, coordinate tag) pairs of the GPS IFD.
pub(crate) const HEMISPHERE_PAIRS: &[(u32, u32)] = &[
    (0x0001, 0x0002),
    (0x0003, 0x0004),
    (0x0013, 0x0014),
    (0x0015, 0x0016),
];

const GPS_ALTITUDE_REF: u32 = 0x0005;
const GPS_ALTITUDE: u32 = 0x0006;

/// Degrees, minutes and seconds, each stored as an unsigned rational.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LatLng(pub URational, pub URational, pub URational);

impl LatLng {
    /// Decimal degrees, `None` if any component has a zero denominator.
    pub fn to_degrees(&self) -> Option<f64> {
        Some(dms_to_degrees(
            self.0.to_float()?,
            self.1.to_float()?,
            self.2.to_float()?,
            None,
        ))
    }
}

impl TryFrom<&[u8]> for LatLng {
    type Error = DecodeError;

    /// Three little-endian unsigned rationals.
    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        DecodeError::ensure_len(data, 24)?;
        Ok(LatLng(
            decode_rational(data)?,
            decode_rational(&data[8..])?,
            decode_rational(&data[16..])?,
        ))
    }
}

impl From<[(u32, u32); 3]> for LatLng {
    fn from(value: [(u32, u32); 3]) -> Self {
        let [d, m, s] = value.map(URational::from);
        Self(d, m, s)
    }
}

/// `degrees + minutes / 60 + seconds / 3600`, negated for the `S` and `W`
/// hemispheres.
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64, hemisphere: Option<char>) -> f64 {
    let v = degrees + minutes / 60.0 + seconds / 3600.0;
    match hemisphere.map(|c| c.to_ascii_uppercase()) {
        Some('S') | Some('W') => -v,
        _ => v,
    }
}

/// Convert a DMS text such as `43 17 24.46 N` into decimal degrees.
pub fn parse_dms(text: &str) -> Option<f64> {
    let caps = DMS_RE.captures(text)?;
    let degrees = caps["deg"].parse::<f64>().ok()?;
    let minutes = caps["min"].parse::<f64>().ok()?;
    let seconds = caps["sec"].parse::<f64>().ok()?;
    let hemisphere = caps.name("hemi").and_then(|m| m.as_str().chars().next());
    Some(dms_to_degrees(degrees, minutes, seconds, hemisphere))
}

/// Decode a GPS coordinate payload.
///
/// Accepts either a DMS text (hemisphere included) or the binary triple of
/// rationals (hemisphere lives in the separate reference tag).
pub(crate) fn decode_sexagesimal(data: &[u8]) -> Result<FieldValue, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    if let Some(text) = as_printable_text(data) {
        return parse_dms(&text)
            .map(FieldValue::F64)
            .ok_or_else(|| DecodeError::InvalidData(format!("invalid DMS text: {text:?}")));
    }

    let latlng = LatLng::try_from(data)?;
    Ok(latlng
        .to_degrees()
        .map(FieldValue::F64)
        .unwrap_or_else(FieldValue::unknown_rational))
}

fn as_printable_text(data: &[u8]) -> Option<String> {
    let end = data.iter().rposition(|b| *b != 0)? + 1;
    let text = &data[..end];
    if text.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        Some(text.iter().map(|b| *b as char).collect())
    } else {
        None
    }
}

fn hemisphere_of(fields: &[DecodedField], ref_id: u32) -> Option<char> {
    fields
        .iter()
        .find(|f| f.group == ExifGroup::GpsInfo && f.tag_id == ref_id)
        .and_then(|f| f.value.as_str())
        .and_then(|s| s.trim().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

/// Apply the hemisphere letters of the GPS reference tags to the decoded
/// coordinates in place.
pub(crate) fn resolve_hemispheres(fields: &mut [DecodedField]) {
    for (ref_id, coord_id) in HEMISPHERE_PAIRS {
        let Some(hemisphere) = hemisphere_of(fields, *ref_id) else {
            continue;
        };
        if hemisphere != 'S' && hemisphere != 'W' {
            continue;
        }

        for field in fields
            .iter_mut()
            .filter(|f| f.group == ExifGroup::GpsInfo && f.tag_id == *coord_id)
        {
            if let FieldValue::F64(v) = field.value {
                tracing::debug!(tag = coord_id, %hemisphere, "negate coordinate");
                field.value = FieldValue::F64(-v.abs());
            }
        }
    }
}

/// Position summary built from decoded GPS fields.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GPSInfo {
    /// Signed decimal degrees, negative in the southern hemisphere.
    pub latitude: f64,
    /// Signed decimal degrees, negative in the western hemisphere.
    pub longitude: f64,
    /// Meters, negative below sea level.
    pub altitude: Option<f64>,
}

impl GPSInfo {
    /// Collect latitude, longitude and altitude from a decoded field list.
    /// Works whether or not hemispheres have already been resolved.
    pub fn from_fields(fields: &[DecodedField]) -> Option<GPSInfo> {
        let coordinate = |ref_id: u32, coord_id: u32| -> Option<f64> {
            let v = fields
                .iter()
                .find(|f| f.group == ExifGroup::GpsInfo && f.tag_id == coord_id)?
                .value
                .as_f64()?;
            // Text payloads carry their own sign when no reference tag exists.
            let v = match hemisphere_of(fields, ref_id) {
                Some(h) => dms_to_degrees(v.abs(), 0.0, 0.0, Some(h)),
                None => v,
            };
            Some(v)
        };

        let latitude = coordinate(HEMISPHERE_PAIRS[0].0, HEMISPHERE_PAIRS[0].1)?;
        let longitude = coordinate(HEMISPHERE_PAIRS[1].0, HEMISPHERE_PAIRS[1].1)?;

        let altitude = fields
            .iter()
            .find(|f| f.group == ExifGroup::GpsInfo && f.tag_id == GPS_ALTITUDE)
            .and_then(|f| f.value.as_f64())
            .map(|alt| {
                let below_sea_level = fields
                    .iter()
                    .find(|f| f.group == ExifGroup::GpsInfo && f.tag_id == GPS_ALTITUDE_REF)
                    .and_then(|f| f.value.as_u8())
                    == Some(1);
                if below_sea_level {
                    -alt
                } else {
                    alt
                }
            });

        Some(GPSInfo {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Returns an ISO 6709 geographic point location string such as
    /// `+48.85770+002.29500/`.
    ///
    /// ⚠️ Altitude information is ignored currently.
    pub fn to_iso6709(&self) -> String {
        format!(
            "{}{:08.5}{}{:09.5}/",
            if self.latitude < 0.0 { '-' } else { '+' },
            self.latitude.abs(),
            if self.longitude < 0.0 { '-' } else { '+' },
            self.longitude.abs(),
        )
    }
}
