use std::fmt::Display;

use chrono::NaiveDateTime;
#[cfg(feature = "json_dump")]
use serde::{Serialize, Serializer};

use crate::error::DecodeError;

/// Sentinel text produced in place of a quotient when a rational value has a
/// zero denominator.
pub const UNKNOWN_RATIONAL: &str = "Unknown Rational";

/// Represent a decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),

    U8(u8),
    U16(u16),
    U32(u32),
    I32(i32),

    F32(f32),
    F64(f64),

    Undefined(Vec<u8>),
}

impl FieldValue {
    pub(crate) fn unknown_rational() -> FieldValue {
        FieldValue::Text(UNKNOWN_RATIONAL.to_owned())
    }

    /// Returns true if this value is the `"Unknown Rational"` sentinel.
    pub fn is_unknown_rational(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s == UNKNOWN_RATIONAL)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            FieldValue::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            FieldValue::U16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            FieldValue::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FieldValue::F32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_undefined(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Undefined(v) => Some(v),
            _ => None,
        }
    }

    /// Parse an Exif date time text such as `2023:07:09 20:36:33`.
    ///
    /// Exif date times carry no offset, so a naive date time is returned.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        let s = self.as_str()?.trim();
        NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S").ok()
    }
}

#[cfg(feature = "json_dump")]
impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Text(v) => serializer.serialize_str(v),
            FieldValue::U8(v) => serializer.serialize_u8(*v),
            FieldValue::U16(v) => serializer.serialize_u16(*v),
            FieldValue::U32(v) => serializer.serialize_u32(*v),
            FieldValue::I32(v) => serializer.serialize_i32(*v),
            FieldValue::F32(v) => serializer.serialize_f32(*v),
            FieldValue::F64(v) => serializer.serialize_f64(*v),
            FieldValue::Undefined(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::U8(v) => Display::fmt(&v, f),
            FieldValue::U16(v) => Display::fmt(&v, f),
            FieldValue::U32(v) => Display::fmt(&v, f),
            FieldValue::I32(v) => Display::fmt(&v, f),
            FieldValue::F32(v) => Display::fmt(&v, f),
            FieldValue::F64(v) => Display::fmt(&v, f),
            FieldValue::Undefined(v) => {
                // Display up to MAX_DISPLAY_NUM bytes, and replace the rest with ellipsis
                const MAX_DISPLAY_NUM: usize = 8;
                let s = v
                    .iter()
                    .map(|x| format!("0x{x:02x}"))
                    .take(MAX_DISPLAY_NUM + 1)
                    .enumerate()
                    .map(|(i, x)| {
                        if i >= MAX_DISPLAY_NUM {
                            "...".to_owned()
                        } else {
                            x
                        }
                    })
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "Undefined[{}]", s)
            }
        }
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::U8(value)
    }
}
impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        FieldValue::U16(value)
    }
}
impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::U32(value)
    }
}
impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::I32(value)
    }
}
impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::F32(value)
    }
}
impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::F64(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

pub type URational = Rational<u32>;
pub type IRational = Rational<i32>;

/// A numerator/denominator pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rational<T>(pub T, pub T);

impl<T> Rational<T>
where
    T: Copy + Into<f64> + PartialEq + Default,
{
    /// Returns the quotient, or `None` when the denominator is zero.
    pub fn to_float(&self) -> Option<f64> {
        if self.1 == T::default() {
            None
        } else {
            Some(self.0.into() / self.1.into())
        }
    }
}

impl<T> From<(T, T)> for Rational<T>
where
    T: Copy,
{
    fn from(value: (T, T)) -> Self {
        Self(value.0, value.1)
    }
}

/// # Exif Data format
///
/// ```txt
/// | Value           |             1 |             2 |              3 |               4 |                 5 |            6 |
/// |-----------------+---------------+---------------+----------------+-----------------+-------------------+--------------|
/// | Format          | unsigned byte | ascii strings | unsigned short |   unsigned long | unsigned rational |  signed byte |
/// | Bytes/component |             1 |             1 |              2 |               4 |                 8 |            1 |
///
/// | Value           |             7 |             8 |              9 |              10 |                11 |           12 |
/// |-----------------+---------------+---------------+----------------+-----------------+-------------------+--------------|
/// | Format          |     undefined |  signed short |    signed long | signed rational |      single float | double float |
/// | Bytes/component |             1 |             2 |              4 |               8 |                 4 |            8 |
/// ```
///
/// See: [Exif](https://www.media.mit.edu/pia/Research/deepview/exif.html).
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DataFormat {
    U8 = 1,
    Text = 2,
    U16 = 3,
    U32 = 4,
    URational = 5,
    I8 = 6,
    Undefined = 7,
    I16 = 8,
    I32 = 9,
    IRational = 10,
    F32 = 11,
    F64 = 12,
}

impl DataFormat {
    pub fn component_size(&self) -> usize {
        match self {
            Self::U8 | Self::I8 | Self::Text | Self::Undefined => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::URational | Self::IRational | Self::F64 => 8,
        }
    }

    /// Size of the units that must be byte swapped when converting a
    /// big-endian payload to little-endian.
    pub fn swap_unit(&self) -> usize {
        match self {
            Self::URational | Self::IRational => 4,
            _ => self.component_size(),
        }
    }
}

impl TryFrom<u16> for DataFormat {
    type Error = DecodeError;
    fn try_from(v: u16) -> Result<Self, Self::Error> {
        let format = match v {
            1 => Self::U8,
            2 => Self::Text,
            3 => Self::U16,
            4 => Self::U32,
            5 => Self::URational,
            6 => Self::I8,
            7 => Self::Undefined,
            8 => Self::I16,
            9 => Self::I32,
            10 => Self::IRational,
            11 => Self::F32,
            12 => Self::F64,
            _ => return Err(DecodeError::InvalidData(format!("data format {v}"))),
        };
        Ok(format)
    }
}

/// Read a fixed size little-endian value from the head of a payload.
pub(crate) trait FromLeBytes: Sized {
    fn from_le_head(bs: &[u8]) -> Result<Self, DecodeError>;
}

macro_rules! impl_from_le_bytes {
    ($($t:ty),+) => {
        $(
            impl FromLeBytes for $t {
                fn from_le_head(bs: &[u8]) -> Result<Self, DecodeError> {
                    const SIZE: usize = std::mem::size_of::<$t>();
                    DecodeError::ensure_len(bs, SIZE)?;
                    let mut buf = [0u8; SIZE];
                    buf.copy_from_slice(&bs[..SIZE]);
                    Ok(<$t>::from_le_bytes(buf))
                }
            }
        )+
    };
}

impl_from_le_bytes!(u16, u32, i32, f32);

pub(crate) fn decode_rational<T: FromLeBytes>(data: &[u8]) -> Result<Rational<T>, DecodeError> {
    DecodeError::ensure_len(data, 8)?;

    let numerator = T::from_le_head(data)?;
    let denominator = T::from_le_head(&data[4..])?; // Safe-slice
    Ok(Rational::<T>(numerator, denominator))
}

/// Interpret bytes as single-byte text, removing one trailing NUL.
pub(crate) fn single_byte_text(data: &[u8]) -> String {
    let data = data.strip_suffix(&[0]).unwrap_or(data);
    data.iter().map(|b| *b as char).collect()
}
