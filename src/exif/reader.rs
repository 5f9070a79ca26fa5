use std::collections::BTreeMap;

use bytes::Bytes;

use super::{decoder::decode_property, field::DecodedField, gps};
use crate::error::DecodeError;

/// Exclusive upper bound of the property ids probed by [`PropertyReader`].
pub const PROPERTY_ID_LIMIT: u32 = 53_000;

/// A raw metadata record: a tag id and its payload, in little-endian order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyItem {
    pub id: u32,
    pub raw: Bytes,
}

impl PropertyItem {
    pub fn new(id: u32, raw: impl Into<Bytes>) -> Self {
        Self { id, raw: raw.into() }
    }

    pub fn decode(&self) -> Result<Vec<DecodedField>, DecodeError> {
        decode_property(self.id, &self.raw)
    }
}

/// Anything that can answer "which property item is stored under this id".
pub trait PropertySource {
    fn property_item(&self, id: u32) -> Option<PropertyItem>;
}

impl PropertySource for BTreeMap<u32, PropertyItem> {
    fn property_item(&self, id: u32) -> Option<PropertyItem> {
        self.get(&id).cloned()
    }
}

impl PropertySource for [PropertyItem] {
    fn property_item(&self, id: u32) -> Option<PropertyItem> {
        self.iter().find(|p| p.id == id).cloned()
    }
}

impl PropertySource for Vec<PropertyItem> {
    fn property_item(&self, id: u32) -> Option<PropertyItem> {
        self.as_slice().property_item(id)
    }
}

impl<S: PropertySource + ?Sized> PropertySource for &S {
    fn property_item(&self, id: u32) -> Option<PropertyItem> {
        (**self).property_item(id)
    }
}

/// Enumerates the property items of a source and decodes them.
///
/// Every id in `[0, id_limit)` is probed in ascending order, so the output
/// is ordered by tag id and then by table order.
///
/// # Usage
///
/// ```rust
/// use exif_fields::*;
///
/// let items = vec![
///     PropertyItem::new(0x010f, &b"Canon\0"[..]),
///     PropertyItem::new(0x829d, vec![28u8, 0, 0, 0, 10, 0, 0, 0]),
/// ];
///
/// let fields = PropertyReader::new().decode(&items);
/// assert_eq!(fields.len(), 3);
/// assert_eq!(fields[0].key(), "Image.Make");
/// assert_eq!(fields[2].key(), "Photo.FNumber");
/// assert_eq!(fields[2].value.as_f64(), Some(2.8));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PropertyReader {
    id_limit: u32,
    resolve_hemispheres: bool,
}

impl Default for PropertyReader {
    fn default() -> Self {
        Self {
            id_limit: PROPERTY_ID_LIMIT,
            resolve_hemispheres: true,
        }
    }
}

impl PropertyReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe ids in `[0, limit)` instead of `[0, PROPERTY_ID_LIMIT)`.
    pub fn with_id_limit(mut self, limit: u32) -> Self {
        self.id_limit = limit;
        self
    }

    /// Whether to negate GPS coordinates whose reference tag says `S` or
    /// `W`. Enabled by default.
    pub fn resolve_hemispheres(mut self, resolve: bool) -> Self {
        self.resolve_hemispheres = resolve;
        self
    }

    /// Collect the items present in `source`, ordered by id.
    pub fn read<S: PropertySource + ?Sized>(&self, source: &S) -> Vec<PropertyItem> {
        (0..self.id_limit)
            .filter_map(|id| source.property_item(id))
            .collect()
    }

    /// Decode every item present in `source`.
    ///
    /// Items that fail to decode are logged and skipped; they never abort
    /// the enumeration.
    #[tracing::instrument(skip_all, fields(id_limit = self.id_limit))]
    pub fn decode<S: PropertySource + ?Sized>(&self, source: &S) -> Vec<DecodedField> {
        let mut fields = Vec::new();
        for item in self.read(source) {
            match item.decode() {
                Ok(decoded) => fields.extend(decoded),
                Err(e) => {
                    tracing::warn!(tag = item.id, len = item.raw.len(), error = %e, "property skipped");
                }
            }
        }

        if self.resolve_hemispheres {
            gps::resolve_hemispheres(&mut fields);
        }
        tracing::debug!(count = fields.len(), "properties decoded");
        fields
    }
}
