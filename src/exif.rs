pub use decoder::{decode_property, decode_value};
pub use field::{DecodedField, EXIF_SOURCE};
pub use gps::{dms_to_degrees, parse_dms, GPSInfo, LatLng};
pub use reader::{PropertyItem, PropertyReader, PropertySource, PROPERTY_ID_LIMIT};
pub use tags::{
    is_rational_tag, is_sexagesimal_tag, lookup_tag, tag_table, ExifGroup, TagEntry, ValueType,
};

pub(crate) use tiff::{IfdKind, IfdWalker, TiffHeader};

mod decoder;
mod field;
mod gps;
mod reader;
pub(crate) mod tags;
mod tiff;
