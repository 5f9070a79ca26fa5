use std::fmt::Display;

use crate::{
    exif::TiffHeader,
    jpeg::{check_exif_ident, check_jpeg, check_jpeg_exif, EXIF_IDENT},
};

/// Container formats that can carry property items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// *.jpg, *.jpeg, Exif in APP1 and MPF in APP2 segments.
    Jpeg,
    /// *.tif, *.tiff, *.dng and TIFF based raw files.
    Tiff,
    /// A bare Exif block: `Exif\0\0` followed by a TIFF header, as stored in
    /// HEIF `Exif` items or extracted APP1 payloads.
    Exif,
}

// Parse the input buffer and detect its file type
impl TryFrom<&[u8]> for FileFormat {
    type Error = crate::Error;

    fn try_from(input: &[u8]) -> Result<Self, Self::Error> {
        if check_jpeg(input).is_ok() {
            Ok(Self::Jpeg)
        } else if TiffHeader::parse(input).is_ok() {
            Ok(Self::Tiff)
        } else if check_exif_ident(input) && TiffHeader::parse(&input[EXIF_IDENT.len()..]).is_ok() {
            Ok(Self::Exif)
        } else {
            Err(crate::Error::UnrecognizedFileFormat)
        }
    }
}

impl FileFormat {
    /// Detect the container format from the leading bytes of a file.
    pub fn detect(input: &[u8]) -> crate::Result<FileFormat> {
        input.try_into()
    }

    pub fn mime(&self) -> &'static str {
        match self {
            FileFormat::Jpeg => "image/jpeg",
            FileFormat::Tiff => "image/tiff",
            FileFormat::Exif => "application/octet-stream",
        }
    }
}

impl Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FileFormat::Jpeg => "JPEG",
            FileFormat::Tiff => "TIFF",
            FileFormat::Exif => "Exif",
        };
        f.write_str(s)
    }
}

/// Whether `input` is a container that actually holds Exif metadata: a JPEG
/// with an APP1 `Exif` segment, a TIFF file, or a bare Exif block.
///
/// Files for which this returns `false` can still be opened, they just
/// yield no property items.
pub fn has_exif_container(input: &[u8]) -> bool {
    match FileFormat::detect(input) {
        Ok(FileFormat::Jpeg) => check_jpeg_exif(input),
        Ok(FileFormat::Tiff) | Ok(FileFormat::Exif) => true,
        Err(_) => false,
    }
}
