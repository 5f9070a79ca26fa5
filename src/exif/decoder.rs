use super::{
    field::DecodedField,
    gps::decode_sexagesimal,
    tags::{
        is_rational_tag, is_sexagesimal_tag, is_text_undefined_tag, lookup_tag, ExifGroup,
        ValueType,
    },
};
use crate::{
    error::DecodeError,
    values::{decode_rational, single_byte_text, FromLeBytes, IRational, URational},
    FieldValue,
};

/// Character code prefixes of `UserComment` like fields.
const ASCII_CHARSET: &[u8; 8] = b"ASCII\0\0\0";
const UNDEFINED_CHARSET: &[u8; 8] = &[0; 8];

/// The concrete decoding applied to a payload, selected from the declared
/// type and the tag classification sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeRule {
    Ascii,
    Byte,
    Short,
    Long,
    Rational,
    SRational,
    Sexagesimal,
    Comment,
    Float,
    TextUndefined,
    Undefined,
    Fallback,
}

impl DecodeRule {
    fn select(value_type: ValueType, id: u32) -> DecodeRule {
        use ValueType::*;

        match value_type {
            Long | Rational | SRational if is_sexagesimal_tag(id) => DecodeRule::Sexagesimal,
            Long if is_rational_tag(id) => DecodeRule::Rational,
            Long => DecodeRule::Long,
            Rational => DecodeRule::Rational,
            SRational => DecodeRule::SRational,
            Ascii => DecodeRule::Ascii,
            Byte => DecodeRule::Byte,
            Short => DecodeRule::Short,
            Comment => DecodeRule::Comment,
            Float | Double => DecodeRule::Float,
            Undefined if is_text_undefined_tag(id) => DecodeRule::TextUndefined,
            Undefined => DecodeRule::Undefined,
            Unknown => DecodeRule::Fallback,
        }
    }

    fn decode(self, data: &[u8]) -> Result<FieldValue, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::EmptyPayload);
        }

        let value = match self {
            DecodeRule::Ascii => FieldValue::Text(single_byte_text(data)),
            DecodeRule::Byte => FieldValue::U8(data[0]),
            DecodeRule::Short => FieldValue::U16(u16::from_le_head(data)?),
            DecodeRule::Long => FieldValue::U32(u32::from_le_head(data)?),
            DecodeRule::Rational => {
                let r: URational = decode_rational(data)?;
                rational_value(r.to_float())
            }
            DecodeRule::SRational => {
                let r: IRational = decode_rational(data)?;
                rational_value(r.to_float())
            }
            DecodeRule::Sexagesimal => decode_sexagesimal(data)?,
            DecodeRule::Comment => FieldValue::Text(comment_text(data)),
            DecodeRule::Float => FieldValue::F32(f32::from_le_head(data)?),
            DecodeRule::TextUndefined => FieldValue::Text(trimmed_text(data)),
            DecodeRule::Undefined => FieldValue::Undefined(data.to_vec()),
            DecodeRule::Fallback => FieldValue::I32(i32::from_le_head(data)?),
        };
        Ok(value)
    }
}

fn rational_value(quotient: Option<f64>) -> FieldValue {
    quotient
        .map(FieldValue::F64)
        .unwrap_or_else(FieldValue::unknown_rational)
}

fn trimmed_text(data: &[u8]) -> String {
    let end = data.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    single_byte_text(&data[..end])
}

fn comment_text(data: &[u8]) -> String {
    let body = match data.split_at_checked(8) {
        Some((charset, body)) if charset == ASCII_CHARSET || charset == UNDEFINED_CHARSET => body,
        _ => data,
    };
    trimmed_text(body)
}

/// Decode `data` as a value of the declared `value_type` for tag `id`.
///
/// The classification sets take precedence over the declared type: GPS
/// coordinate tags decode to decimal degrees, and `Long` tags known to hold
/// fractions decode as rationals. A zero denominator yields the
/// `"Unknown Rational"` sentinel instead of a quotient.
pub fn decode_value(value_type: ValueType, id: u32, data: &[u8]) -> Result<FieldValue, DecodeError> {
    DecodeRule::select(value_type, id).decode(data)
}

/// Decode one property item into its fields.
///
/// Emits one field per table entry matching `id`, in table order. An id with
/// no table entry yields a single `Unknown` field holding the first four
/// bytes as a little-endian `i32`.
///
/// A table entry whose payload can't be decoded under its rule is dropped;
/// an error is returned only if no field could be produced at all.
pub fn decode_property(id: u32, data: &[u8]) -> Result<Vec<DecodedField>, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }

    let entries = lookup_tag(id);
    if entries.is_empty() {
        let value = DecodeRule::Fallback.decode(data)?;
        return Ok(vec![DecodedField::new(
            id,
            ExifGroup::Unknown,
            "Unknown",
            ValueType::Unknown,
            value,
        )]);
    }

    let mut fields = Vec::with_capacity(entries.len());
    let mut last_err = None;
    for entry in entries {
        match decode_value(entry.value_type, id, data) {
            Ok(value) => fields.push(DecodedField::new(
                id,
                entry.group,
                entry.name,
                entry.value_type,
                value,
            )),
            Err(e) => {
                tracing::debug!(tag = id, group = %entry.group, name = entry.name, ?e, "entry skipped");
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(e) if fields.is_empty() => Err(e),
        _ => Ok(fields),
    }
}
