//! exif-fields decodes raw Exif property items (a numeric tag id plus its
//! payload bytes) into named, typed, human readable fields, and ships a pure
//! Rust property source for JPEG/TIFF files written with
//! [nom](https://github.com/rust-bakery/nom).
//!
//! ## Key Features
//!
//! - A static, one-to-many tag table: the same id may be meaningful in more
//!   than one directory (e.g. `FNumber` in both `Image` and `Photo`, or id
//!   `0x0002` in both `Iop` and `GPSInfo`), and decoding emits one
//!   [`DecodedField`] per match.
//!
//! - Pure per-item decoding: [`decode_property`] is a function of
//!   `(id, bytes)` only. Rationals with a zero denominator decode to the
//!   [`UNKNOWN_RATIONAL`] sentinel, GPS coordinates to decimal degrees, and
//!   unrecognized ids to a single `Unknown` field.
//!
//! - Robustness: a payload that can't be decoded only drops its own field.
//!   Faults are reported through [`tracing`](https://docs.rs/tracing) and
//!   never abort the decoding of a file.
//!
//! - *Zero-copy* when appropriate: property items of little-endian files
//!   share the file buffer.
//!
//! ## Supported File Types
//!
//! - *.jpg, *.jpeg (Exif in APP1, Multi-Picture Format index in APP2)
//! - *.tif, *.tiff and TIFF based raw files
//! - bare `Exif\0\0` blocks
//!
//! ## Decoding a property item
//!
//! ```rust
//! use exif_fields::*;
//!
//! let fields = decode_property(0x829d, &[28, 0, 0, 0, 10, 0, 0, 0]).unwrap();
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields[0].key(), "Image.FNumber");
//! assert_eq!(fields[1].key(), "Photo.FNumber");
//! assert_eq!(fields[1].value, FieldValue::F64(2.8));
//!
//! let fields = decode_property(0x829a, &[5, 0, 0, 0, 0, 0, 0, 0]).unwrap();
//! assert_eq!(fields[0].value.as_str(), Some(UNKNOWN_RATIONAL));
//!
//! let fields = decode_property(99999, &[42, 0, 0, 0]).unwrap();
//! assert_eq!(fields[0].group, ExifGroup::Unknown);
//! assert_eq!(fields[0].value, FieldValue::I32(42));
//! ```
//!
//! ## Decoding a file
//!
//! ```rust,no_run
//! use exif_fields::*;
//!
//! fn main() -> Result<()> {
//!     let props = ImageProperties::open("./photo.jpg")?;
//!     let fields = PropertyReader::new().decode(&props);
//!     for field in &fields {
//!         println!("{field}");
//!     }
//!
//!     if let Some(gps) = GPSInfo::from_fields(&fields) {
//!         println!("{}", gps.to_iso6709());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Async API Usage
//!
//! Enable `async` feature flag for exif-fields in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! exif-fields = { version = "0.1", features = ["async"] }
//! ```
//!
//! ```rust,no_run
//! #[cfg(feature = "async")]
//! #[tokio::main]
//! async fn main() -> exif_fields::Result<()> {
//!     let fields = exif_fields::decode_file_async("./photo.jpg").await?;
//!     println!("{} fields", fields.len());
//!     Ok(())
//! }
//!
//! #[cfg(not(feature = "async"))]
//! fn main() {}
//! ```
//!
//! ## JSON
//!
//! With the `json_dump` feature, [`DecodedField`] implements
//! `serde::Serialize`.

pub use error::{DecodeError, Error};
pub use exif::{
    decode_property, decode_value, dms_to_degrees, is_rational_tag, is_sexagesimal_tag,
    lookup_tag, parse_dms, tag_table, DecodedField, ExifGroup, GPSInfo, LatLng, PropertyItem,
    PropertyReader, PropertySource, TagEntry, ValueType, EXIF_SOURCE, PROPERTY_ID_LIMIT,
};
pub use file::{has_exif_container, FileFormat};
#[cfg(feature = "async")]
pub use properties::decode_file_async;
pub use properties::{decode_bytes, decode_file, ImageProperties};
pub use values::{FieldValue, IRational, Rational, URational, UNKNOWN_RATIONAL};

mod error;
mod exif;
mod file;
mod jpeg;
mod properties;
mod values;

#[cfg(test)]
mod testkit;

pub type Result<T> = std::result::Result<T, Error>;
