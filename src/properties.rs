use std::{collections::BTreeMap, path::Path};

use bytes::Bytes;

use crate::{
    exif::{IfdKind, IfdWalker},
    file::FileFormat,
    jpeg::{self, EXIF_IDENT},
    DecodedField, PropertyItem, PropertyReader, PropertySource,
};

/// The property items of an image file, keyed by tag id.
///
/// Items are collected from IFD0, the Exif, GPS and Interoperability
/// sub-IFDs and, for JPEG files, the MPF index. When an id occurs in more
/// than one directory the first one wins. Payloads are normalized to
/// little-endian.
///
/// # Usage
///
/// ```rust
/// use exif_fields::*;
///
/// // a minimal little-endian TIFF with a single `Make` entry
/// let mut tiff = b"II*\0\x08\0\0\0\x01\0".to_vec();
/// tiff.extend([0x0f, 0x01, 2, 0, 4, 0, 0, 0]);
/// tiff.extend(b"vivo");
/// tiff.extend([0, 0, 0, 0]);
///
/// let props = ImageProperties::from_bytes(tiff).unwrap();
/// assert_eq!(props.format(), FileFormat::Tiff);
/// assert_eq!(props.len(), 1);
///
/// let fields = PropertyReader::new().decode(&props);
/// assert_eq!(fields[0].to_string(), "Exif.Image.Make (0x010f, Ascii) » vivo");
/// ```
#[derive(Debug, Clone)]
pub struct ImageProperties {
    format: FileFormat,
    items: BTreeMap<u32, PropertyItem>,
}

impl ImageProperties {
    /// Parse an in-memory file. Payloads of little-endian files share the
    /// buffer with `data`.
    #[tracing::instrument(skip_all)]
    pub fn from_bytes(data: impl Into<Bytes>) -> crate::Result<ImageProperties> {
        let data: Bytes = data.into();
        let format = FileFormat::detect(&data)?;
        tracing::debug!(%format, len = data.len(), "file format detected");

        let mut items = BTreeMap::new();
        match format {
            FileFormat::Jpeg => {
                let meta = jpeg::extract_metadata(&data)?;
                if let Some(exif) = meta.exif {
                    IfdWalker::collect(&exif, IfdKind::Ifd0, &mut items)?;
                }
                if let Some(mpf) = meta.mpf {
                    if let Err(e) = IfdWalker::collect(&mpf, IfdKind::Mpf, &mut items) {
                        tracing::warn!(%e, "MPF block ignored");
                    }
                }
            }
            FileFormat::Tiff => IfdWalker::collect(&data, IfdKind::Ifd0, &mut items)?,
            FileFormat::Exif => {
                IfdWalker::collect(&data.slice(EXIF_IDENT.len()..), IfdKind::Ifd0, &mut items)?
            }
        }

        tracing::debug!(count = items.len(), "property items collected");
        Ok(ImageProperties { format, items })
    }

    /// Read and parse the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> crate::Result<ImageProperties> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Read and parse the file at `path` with `tokio::fs`.
    #[cfg(feature = "async")]
    pub async fn open_async(path: impl AsRef<Path>) -> crate::Result<ImageProperties> {
        let data = tokio::fs::read(path).await?;
        Self::from_bytes(data)
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&PropertyItem> {
        self.items.get(&id)
    }

    /// Items in ascending id order.
    pub fn items(&self) -> impl Iterator<Item = &PropertyItem> {
        self.items.values()
    }
}

impl PropertySource for ImageProperties {
    fn property_item(&self, id: u32) -> Option<PropertyItem> {
        self.items.property_item(id)
    }
}

/// Parse an in-memory image file and decode all of its property items with
/// the default [`PropertyReader`].
pub fn decode_bytes(data: impl Into<Bytes>) -> crate::Result<Vec<DecodedField>> {
    let props = ImageProperties::from_bytes(data)?;
    Ok(PropertyReader::new().decode(&props))
}

/// Read an image file and decode all of its property items with the default
/// [`PropertyReader`].
///
/// # Usage
///
/// ```rust,no_run
/// use exif_fields::*;
///
/// fn main() -> Result<()> {
///     for field in decode_file("./photo.jpg")? {
///         println!("{field}");
///     }
///     Ok(())
/// }
/// ```
pub fn decode_file(path: impl AsRef<Path>) -> crate::Result<Vec<DecodedField>> {
    let props = ImageProperties::open(path)?;
    Ok(PropertyReader::new().decode(&props))
}

/// Async version of [`decode_file`].
#[cfg(feature = "async")]
pub async fn decode_file_async(path: impl AsRef<Path>) -> crate::Result<Vec<DecodedField>> {
    let props = ImageProperties::open_async(path).await?;
    Ok(PropertyReader::new().decode(&props))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testkit::{jpeg, Entry, TiffBuilder},
        ExifGroup, FieldValue,
    };
    use nom::number::Endianness;
    use test_case::test_case;

    fn camera_tiff(endian: Endianness) -> Vec<u8> {
        TiffBuilder::new(endian)
            .ifd0(vec![
                Entry::ascii(0x010f, "Canon"),
                Entry::ascii(0x0110, "Canon EOS 5D"),
                Entry::short(0x0112, &[1]),
                Entry::ascii(0x0132, "2023:07:09 20:36:33"),
            ])
            .exif(vec![
                Entry::rational(0x829a, &[(1, 500)]),
                Entry::rational(0x829d, &[(28, 10)]),
                Entry::short(0x8827, &[400]),
                Entry::undefined(0x9000, b"0230"),
                Entry::ascii(0x9003, "2023:07:09 20:36:33"),
                Entry::srational(0x9204, &[(0, 1)]),
                Entry::undefined(0x9286, b"ASCII\0\0\0hello"),
                Entry::undefined(0xa000, b"0100"),
            ])
            .gps(vec![
                Entry::byte(0x0000, &[2, 3, 0, 0]),
                Entry::ascii(0x0001, "S"),
                Entry::rational(0x0002, &[(33, 1), (51, 1), (54, 1)]),
                Entry::ascii(0x0003, "W"),
                Entry::rational(0x0004, &[(70, 1), (39, 1), (0, 1)]),
                Entry::byte(0x0005, &[0]),
                Entry::rational(0x0006, &[(0, 0)]),
            ])
            .build()
    }

    fn value<'a>(fields: &'a [DecodedField], key: &str) -> &'a FieldValue {
        &fields
            .iter()
            .find(|f| f.key() == key)
            .unwrap_or_else(|| panic!("{key} not found"))
            .value
    }

    #[test_case(Endianness::Little)]
    #[test_case(Endianness::Big)]
    fn tiff(endian: Endianness) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let fields = decode_bytes(camera_tiff(endian)).unwrap();

        assert_eq!(value(&fields, "Image.Make"), &FieldValue::from("Canon"));
        assert_eq!(value(&fields, "Image.Model"), &FieldValue::from("Canon EOS 5D"));
        assert_eq!(value(&fields, "Image.Orientation"), &FieldValue::U16(1));
        assert_eq!(value(&fields, "Photo.ExposureTime").as_f64(), Some(0.002));
        assert_eq!(value(&fields, "Image.FNumber"), &FieldValue::F64(2.8));
        assert_eq!(value(&fields, "Photo.FNumber"), &FieldValue::F64(2.8));
        assert_eq!(value(&fields, "Photo.ISOSpeedRatings"), &FieldValue::U16(400));
        assert_eq!(value(&fields, "Photo.ExifVersion"), &FieldValue::from("0230"));
        assert_eq!(value(&fields, "Photo.FlashpixVersion"), &FieldValue::from("0100"));
        assert_eq!(value(&fields, "Photo.ExposureBiasValue"), &FieldValue::F64(0.0));
        assert_eq!(value(&fields, "Photo.UserComment"), &FieldValue::from("hello"));
        assert!(value(&fields, "Photo.DateTimeOriginal")
            .as_datetime()
            .is_some());
        assert!(value(&fields, "GPSInfo.GPSAltitude").is_unknown_rational());

        let lat = value(&fields, "GPSInfo.GPSLatitude").as_f64().unwrap();
        assert!((lat + 33.865).abs() < 1e-9, "{lat}");
        let lng = value(&fields, "GPSInfo.GPSLongitude").as_f64().unwrap();
        assert!((lng + 70.65).abs() < 1e-9, "{lng}");

        // ordered by tag id
        let ids = fields.iter().map(|f| f.tag_id).collect::<Vec<_>>();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        assert!(fields.iter().all(|f| f.group != ExifGroup::Unknown));
    }

    #[test]
    fn byte_order_independent() {
        let le = decode_bytes(camera_tiff(Endianness::Little)).unwrap();
        let be = decode_bytes(camera_tiff(Endianness::Big)).unwrap();
        assert_eq!(le, be);
    }

    #[test]
    fn jpeg_with_mpf() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let exif = camera_tiff(Endianness::Little);
        let mpf = TiffBuilder::new(Endianness::Big)
            .ifd0(vec![
                Entry::undefined(0xb000, b"0100"),
                Entry::long(0xb001, &[2]),
                // already present in the Exif block
                Entry::ascii(0x010f, "Other"),
            ])
            .build();
        let buf = jpeg(Some(exif.as_slice()), Some(mpf.as_slice()));

        let props = ImageProperties::from_bytes(buf).unwrap();
        assert_eq!(props.format(), FileFormat::Jpeg);
        assert_eq!(props.get(0x010f).unwrap().raw.as_ref(), b"Canon\0");
        assert_eq!(props.get(0xb001).unwrap().raw.as_ref(), [2, 0, 0, 0]);

        let fields = PropertyReader::new().decode(&props);
        assert_eq!(value(&fields, "MpfInfo.MPFVersion"), &FieldValue::from("0100"));
        assert_eq!(value(&fields, "MpfInfo.MPFNumberOfImages"), &FieldValue::U32(2));
    }

    #[test]
    fn jpeg_without_exif() {
        let props = ImageProperties::from_bytes(jpeg(None, None)).unwrap();
        assert!(props.is_empty());
        assert!(decode_bytes(jpeg(None, None)).unwrap().is_empty());
    }

    #[test]
    fn jpeg_with_corrupt_exif() {
        let buf = jpeg(Some(b"XX*\0\x08\0\0\0".as_slice()), None);
        assert!(matches!(
            ImageProperties::from_bytes(buf),
            Err(crate::Error::ParseFailed(_))
        ));
    }

    #[test]
    fn bare_exif_block() {
        let buf = [b"Exif\0\0".as_slice(), camera_tiff(Endianness::Big).as_slice()].concat();
        let props = ImageProperties::from_bytes(buf).unwrap();
        assert_eq!(props.format(), FileFormat::Exif);
        assert_eq!(props.get(0x0112).unwrap().raw.as_ref(), [1, 0]);
    }

    #[test_case(Endianness::Little)]
    #[test_case(Endianness::Big)]
    fn thumbnail_ifd_not_walked(endian: Endianness) {
        let tiff = TiffBuilder::new(endian)
            .ifd0(vec![Entry::ascii(0x010f, "Canon")])
            .ifd1(vec![
                Entry::short(0x0112, &[6]),
                Entry::long(0x0201, &[0x200]),
                Entry::long(0x0202, &[0x40]),
            ])
            .build();

        // IFD0 holds one entry; its next-IFD offset points at IFD1
        let next = &tiff[8 + 2 + 12..8 + 2 + 12 + 4];
        assert_ne!(next, [0, 0, 0, 0]);

        let props = ImageProperties::from_bytes(tiff).unwrap();
        assert_eq!(props.len(), 1);
        assert!(props.get(0x010f).is_some());
        assert!(props.get(0x0112).is_none());
        assert!(props.get(0x0201).is_none());
        assert!(props.get(0x0202).is_none());
    }

    #[test]
    fn zero_copy_little_endian() {
        let data = Bytes::from(camera_tiff(Endianness::Little));
        let props = ImageProperties::from_bytes(data.clone()).unwrap();
        let make = &props.get(0x0110).unwrap().raw;
        let start = make.as_ptr() as usize - data.as_ptr() as usize;
        assert!(start < data.len());
        assert_eq!(&data[start..start + make.len()], make.as_ref());
    }

    #[test]
    fn unrecognized() {
        assert!(matches!(
            decode_bytes(b"GIF89a".as_slice()),
            Err(crate::Error::UnrecognizedFileFormat)
        ));
    }

    #[test]
    fn open_missing_file() {
        assert!(matches!(
            decode_file("./no/such/file.jpg"),
            Err(crate::Error::ParseFailed(_))
        ));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn open_async() {
        let path = std::env::temp_dir().join(format!("exif-fields-{}.tif", std::process::id()));
        tokio::fs::write(&path, camera_tiff(Endianness::Big))
            .await
            .unwrap();

        let fields = decode_file_async(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(value(&fields, "Image.Make"), &FieldValue::from("Canon"));

        assert!(decode_file_async("./no/such/file.jpg").await.is_err());
    }
}
