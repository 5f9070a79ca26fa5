use std::fmt::Display;

#[cfg(feature = "json_dump")]
use serde::Serialize;

use super::tags::{ExifGroup, ValueType};
use crate::FieldValue;

/// Origin label carried by every decoded field.
pub const EXIF_SOURCE: &str = "Exif";

/// One named, typed field decoded from a property item.
#[cfg_attr(feature = "json_dump", derive(Serialize))]
#[cfg_attr(feature = "json_dump", serde(rename_all = "PascalCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedField {
    pub source: &'static str,
    pub tag_id: u32,
    pub group: ExifGroup,
    pub name: &'static str,
    #[cfg_attr(feature = "json_dump", serde(rename = "Type"))]
    pub value_type: ValueType,
    pub value: FieldValue,
}

impl DecodedField {
    pub(crate) fn new(
        tag_id: u32,
        group: ExifGroup,
        name: &'static str,
        value_type: ValueType,
        value: FieldValue,
    ) -> Self {
        Self {
            source: EXIF_SOURCE,
            tag_id,
            group,
            name,
            value_type,
            value,
        }
    }

    /// `Group.Name`, e.g. `Photo.FNumber`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.group, self.name)
    }
}

impl Display for DecodedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{} (0x{:04x}, {}) » {}",
            self.source, self.group, self.name, self.tag_id, self.value_type, self.value
        )
    }
}
