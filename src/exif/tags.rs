//! Static tag dispatch table, see
//! https://exiv2.org/tags.html and https://exiftool.org/TagNames/EXIF.html
//!
//! The same numeric id can be meaningful in more than one IFD (e.g. the TIFF/EP
//! copies of the shooting parameters in IFD0 vs. the Exif sub-IFD, or the GPS
//! vs. Interoperability directories), so the table is one-to-many.

use std::{collections::HashMap, fmt::Display, sync::LazyLock};

#[cfg(feature = "json_dump")]
use serde::{Serialize, Serializer};

/// Semantic namespace of a decoded field.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum ExifGroup {
    /// IFD0, the main image (TIFF, TIFF/EP and DNG tags).
    Image,
    /// The Exif sub-IFD.
    Photo,
    /// The GPS sub-IFD.
    GpsInfo,
    /// The Multi-Picture Format index IFD.
    MpfInfo,
    /// The Interoperability sub-IFD.
    Iop,
    /// Tag id not present in the dispatch table.
    Unknown,
}

impl ExifGroup {
    pub const fn as_str(self) -> &'static str {
        match self {
            ExifGroup::Image => "Image",
            ExifGroup::Photo => "Photo",
            ExifGroup::GpsInfo => "GPSInfo",
            ExifGroup::MpfInfo => "MpfInfo",
            ExifGroup::Iop => "Iop",
            ExifGroup::Unknown => "Unknown",
        }
    }
}

impl Display for ExifGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl std::str::FromStr for ExifGroup {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let group = match s {
            "Image" => ExifGroup::Image,
            "Photo" => ExifGroup::Photo,
            "GPSInfo" => ExifGroup::GpsInfo,
            "MpfInfo" => ExifGroup::MpfInfo,
            "Iop" => ExifGroup::Iop,
            "Unknown" => ExifGroup::Unknown,
            o => return Err(format!("unrecognized group {o}").into()),
        };
        Ok(group)
    }
}

/// Declared value kind of a tag.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum ValueType {
    Ascii,
    Byte,
    Short,
    Long,
    Rational,
    SRational,
    Comment,
    Float,
    Double,
    Undefined,
    /// Label used by the fallback handler for unrecognized ids.
    Unknown,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueType::Ascii => "Ascii",
            ValueType::Byte => "Byte",
            ValueType::Short => "Short",
            ValueType::Long => "Long",
            ValueType::Rational => "Rational",
            ValueType::SRational => "SRational",
            ValueType::Comment => "Comment",
            ValueType::Float => "Float",
            ValueType::Double => "Double",
            ValueType::Undefined => "Undefined",
            ValueType::Unknown => "Unknown",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

#[cfg(feature = "json_dump")]
impl Serialize for ExifGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "json_dump")]
impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    pub id: u32,
    pub group: ExifGroup,
    pub name: &'static str,
    pub value_type: ValueType,
}

macro_rules! tag_table {
    (
        $( $group:ident => [
            $( ($id:expr, $name:ident, $ty:ident) ),+ $(,)?
        ] ),+ $(,)?
    ) => {
        static TAG_TABLE: &[TagEntry] = &[
            $($(
                TagEntry {
                    id: $id,
                    group: ExifGroup::$group,
                    name: stringify!($name),
                    value_type: ValueType::$ty,
                },
            )+)+
        ];
    };
}

tag_table! {
    Image => [
        (0x000b, ProcessingSoftware, Ascii),
        (0x00fe, NewSubfileType, Long),
        (0x00ff, SubfileType, Short),
        (0x0100, ImageWidth, Long),
        (0x0101, ImageLength, Long),
        (0x0102, BitsPerSample, Short),
        (0x0103, Compression, Short),
        (0x0106, PhotometricInterpretation, Short),
        (0x0107, Thresholding, Short),
        (0x0108, CellWidth, Short),
        (0x0109, CellLength, Short),
        (0x010a, FillOrder, Short),
        (0x010d, DocumentName, Ascii),
        (0x010e, ImageDescription, Ascii),
        (0x010f, Make, Ascii),
        (0x0110, Model, Ascii),
        (0x0111, StripOffsets, Long),
        (0x0112, Orientation, Short),
        (0x0115, SamplesPerPixel, Short),
        (0x0116, RowsPerStrip, Long),
        (0x0117, StripByteCounts, Long),
        (0x011a, XResolution, Rational),
        (0x011b, YResolution, Rational),
        (0x011c, PlanarConfiguration, Short),
        (0x011d, PageName, Ascii),
        (0x011e, XPosition, Rational),
        (0x011f, YPosition, Rational),
        (0x0122, GrayResponseUnit, Short),
        (0x0123, GrayResponseCurve, Short),
        (0x0124, T4Options, Long),
        (0x0125, T6Options, Long),
        (0x0128, ResolutionUnit, Short),
        (0x0129, PageNumber, Short),
        (0x012d, TransferFunction, Short),
        (0x0131, Software, Ascii),
        (0x0132, DateTime, Ascii),
        (0x013b, Artist, Ascii),
        (0x013c, HostComputer, Ascii),
        (0x013d, Predictor, Short),
        (0x013e, WhitePoint, Rational),
        (0x013f, PrimaryChromaticities, Rational),
        (0x0140, ColorMap, Short),
        (0x0141, HalftoneHints, Short),
        (0x0142, TileWidth, Short),
        (0x0143, TileLength, Short),
        (0x0144, TileOffsets, Short),
        (0x0145, TileByteCounts, Short),
        (0x014a, SubIFDs, Long),
        (0x014c, InkSet, Short),
        (0x014d, InkNames, Ascii),
        (0x014e, NumberOfInks, Short),
        (0x0150, DotRange, Byte),
        (0x0151, TargetPrinter, Ascii),
        (0x0152, ExtraSamples, Short),
        (0x0153, SampleFormat, Short),
        (0x0154, SMinSampleValue, Short),
        (0x0155, SMaxSampleValue, Short),
        (0x0156, TransferRange, Short),
        (0x0157, ClipPath, Byte),
        (0x0158, XClipPathUnits, Long),
        (0x0159, YClipPathUnits, Long),
        (0x015a, Indexed, Short),
        (0x015b, JPEGTables, Undefined),
        (0x015f, OPIProxy, Short),
        (0x0200, JPEGProc, Long),
        (0x0201, JPEGInterchangeFormat, Long),
        (0x0202, JPEGInterchangeFormatLength, Long),
        (0x0203, JPEGRestartInterval, Short),
        (0x0205, JPEGLosslessPredictors, Short),
        (0x0206, JPEGPointTransforms, Short),
        (0x0207, JPEGQTables, Long),
        (0x0208, JPEGDCTables, Long),
        (0x0209, JPEGACTables, Long),
        (0x0211, YCbCrCoefficients, Rational),
        (0x0212, YCbCrSubSampling, Short),
        (0x0213, YCbCrPositioning, Short),
        (0x0214, ReferenceBlackWhite, Rational),
        (0x02bc, XMLPacket, Byte),
        (0x4746, Rating, Short),
        (0x4749, RatingPercent, Short),
        (0x800d, ImageID, Ascii),
        (0x828d, CFARepeatPatternDim, Short),
        (0x828e, CFAPattern, Byte),
        (0x828f, BatteryLevel, Rational),
        (0x8298, Copyright, Ascii),
        (0x829a, ExposureTime, Rational),
        (0x829d, FNumber, Rational),
        (0x83bb, IPTCNAA, Long),
        (0x8649, ImageResources, Byte),
        (0x8769, ExifTag, Long),
        (0x8773, InterColorProfile, Undefined),
        (0x8822, ExposureProgram, Short),
        (0x8824, SpectralSensitivity, Ascii),
        (0x8825, GPSTag, Long),
        (0x8827, ISOSpeedRatings, Short),
        (0x8828, OECF, Undefined),
        (0x8829, Interlace, Short),
        (0x882a, TimeZoneOffset, Short),
        (0x882b, SelfTimerMode, Short),
        (0x9003, DateTimeOriginal, Ascii),
        (0x9102, CompressedBitsPerPixel, Rational),
        (0x9201, ShutterSpeedValue, SRational),
        (0x9202, ApertureValue, Rational),
        (0x9203, BrightnessValue, SRational),
        (0x9204, ExposureBiasValue, SRational),
        (0x9205, MaxApertureValue, Rational),
        (0x9206, SubjectDistance, SRational),
        (0x9207, MeteringMode, Short),
        (0x9208, LightSource, Short),
        (0x9209, Flash, Short),
        (0x920a, FocalLength, Rational),
        (0x920b, FlashEnergy, Rational),
        (0x920c, SpatialFrequencyResponse, Undefined),
        (0x920d, Noise, Undefined),
        (0x920e, FocalPlaneXResolution, Rational),
        (0x920f, FocalPlaneYResolution, Rational),
        (0x9210, FocalPlaneResolutionUnit, Short),
        (0x9211, ImageNumber, Long),
        (0x9212, SecurityClassification, Ascii),
        (0x9213, ImageHistory, Ascii),
        (0x9214, SubjectLocation, Short),
        (0x9215, ExposureIndex, Rational),
        (0x9216, TIFFEPStandardID, Byte),
        (0x9217, SensingMethod, Short),
        (0x9c9b, XPTitle, Byte),
        (0x9c9c, XPComment, Byte),
        (0x9c9d, XPAuthor, Byte),
        (0x9c9e, XPKeywords, Byte),
        (0x9c9f, XPSubject, Byte),
        (0xc4a5, PrintImageMatching, Undefined),
        (0xc612, DNGVersion, Byte),
        (0xc613, DNGBackwardVersion, Byte),
        (0xc614, UniqueCameraModel, Ascii),
        (0xc615, LocalizedCameraModel, Byte),
        (0xc616, CFAPlaneColor, Byte),
        (0xc617, CFALayout, Short),
        (0xc618, LinearizationTable, Short),
        (0xc619, BlackLevelRepeatDim, Short),
        (0xc61a, BlackLevel, Rational),
        (0xc61b, BlackLevelDeltaH, SRational),
        (0xc61c, BlackLevelDeltaV, SRational),
        (0xc61d, WhiteLevel, Long),
        (0xc61e, DefaultScale, Rational),
        (0xc61f, DefaultCropOrigin, Long),
        (0xc620, DefaultCropSize, Long),
        (0xc621, ColorMatrix1, SRational),
        (0xc622, ColorMatrix2, SRational),
        (0xc623, CameraCalibration1, SRational),
        (0xc624, CameraCalibration2, SRational),
        (0xc625, ReductionMatrix1, SRational),
        (0xc626, ReductionMatrix2, SRational),
        (0xc627, AnalogBalance, Rational),
        (0xc628, AsShotNeutral, Rational),
        (0xc629, AsShotWhiteXY, Rational),
        (0xc62a, BaselineExposure, SRational),
        (0xc62b, BaselineNoise, Rational),
        (0xc62c, BaselineSharpness, Rational),
        (0xc62d, BayerGreenSplit, Long),
        (0xc62e, LinearResponseLimit, Rational),
        (0xc62f, CameraSerialNumber, Ascii),
        (0xc630, LensInfo, Rational),
        (0xc631, ChromaBlurRadius, Rational),
        (0xc632, AntiAliasStrength, Rational),
        (0xc633, ShadowScale, SRational),
        (0xc634, DNGPrivateData, Byte),
        (0xc635, MakerNoteSafety, Short),
        (0xc65a, CalibrationIlluminant1, Short),
        (0xc65b, CalibrationIlluminant2, Short),
        (0xc65c, BestQualityScale, Rational),
        (0xc65d, RawDataUniqueID, Byte),
        (0xc68b, OriginalRawFileName, Byte),
        (0xc68c, OriginalRawFileData, Undefined),
        (0xc68d, ActiveArea, Long),
        (0xc68e, MaskedAreas, Long),
        (0xc68f, AsShotICCProfile, Undefined),
        (0xc690, AsShotPreProfileMatrix, SRational),
        (0xc691, CurrentICCProfile, Undefined),
        (0xc692, CurrentPreProfileMatrix, SRational),
        (0xc6bf, ColorimetricReference, Short),
        (0xc6f3, CameraCalibrationSignature, Byte),
        (0xc6f4, ProfileCalibrationSignature, Byte),
        (0xc6f6, AsShotProfileName, Byte),
        (0xc6f7, NoiseReductionApplied, Rational),
        (0xc6f8, ProfileName, Byte),
        (0xc6f9, ProfileHueSatMapDims, Long),
        (0xc6fa, ProfileHueSatMapData1, Float),
        (0xc6fb, ProfileHueSatMapData2, Float),
        (0xc6fc, ProfileToneCurve, Float),
        (0xc6fd, ProfileEmbedPolicy, Long),
        (0xc6fe, ProfileCopyright, Byte),
        (0xc714, ForwardMatrix1, SRational),
        (0xc715, ForwardMatrix2, SRational),
        (0xc716, PreviewApplicationName, Byte),
        (0xc717, PreviewApplicationVersion, Byte),
        (0xc718, PreviewSettingsName, Byte),
        (0xc719, PreviewSettingsDigest, Byte),
        (0xc71a, PreviewColorSpace, Long),
        (0xc71b, PreviewDateTime, Ascii),
        (0xc71c, RawImageDigest, Undefined),
        (0xc71d, OriginalRawFileDigest, Undefined),
        (0xc71e, SubTileBlockSize, Long),
        (0xc71f, RowInterleaveFactor, Long),
        (0xc725, ProfileLookTableDims, Long),
        (0xc726, ProfileLookTableData, Float),
        (0xc740, OpcodeList1, Undefined),
        (0xc741, OpcodeList2, Undefined),
        (0xc74e, OpcodeList3, Undefined),
        (0xc761, NoiseProfile, Double),
    ],
    Photo => [
        (0x829a, ExposureTime, Rational),
        (0x829d, FNumber, Rational),
        (0x8822, ExposureProgram, Short),
        (0x8824, SpectralSensitivity, Ascii),
        (0x8827, ISOSpeedRatings, Short),
        (0x8828, OECF, Undefined),
        (0x8830, SensitivityType, Short),
        (0x8831, StandardOutputSensitivity, Long),
        (0x8832, RecommendedExposureIndex, Long),
        (0x8833, ISOSpeed, Long),
        (0x8834, ISOSpeedLatitudeyyy, Long),
        (0x8835, ISOSpeedLatitudezzz, Long),
        (0x9000, ExifVersion, Undefined),
        (0x9003, DateTimeOriginal, Ascii),
        (0x9004, DateTimeDigitized, Ascii),
        (0x9010, OffsetTime, Ascii),
        (0x9011, OffsetTimeOriginal, Ascii),
        (0x9012, OffsetTimeDigitized, Ascii),
        (0x9101, ComponentsConfiguration, Undefined),
        (0x9102, CompressedBitsPerPixel, Rational),
        (0x9201, ShutterSpeedValue, SRational),
        (0x9202, ApertureValue, Rational),
        (0x9203, BrightnessValue, SRational),
        (0x9204, ExposureBiasValue, SRational),
        (0x9205, MaxApertureValue, Rational),
        (0x9206, SubjectDistance, Rational),
        (0x9207, MeteringMode, Short),
        (0x9208, LightSource, Short),
        (0x9209, Flash, Short),
        (0x920a, FocalLength, Rational),
        (0x9214, SubjectArea, Short),
        (0x927c, MakerNote, Undefined),
        (0x9286, UserComment, Comment),
        (0x9290, SubSecTime, Ascii),
        (0x9291, SubSecTimeOriginal, Ascii),
        (0x9292, SubSecTimeDigitized, Ascii),
        (0x9400, Temperature, SRational),
        (0x9401, Humidity, Rational),
        (0x9402, Pressure, Rational),
        (0x9403, WaterDepth, SRational),
        (0x9404, Acceleration, Rational),
        (0x9405, CameraElevationAngle, SRational),
        (0xa000, FlashpixVersion, Undefined),
        (0xa001, ColorSpace, Short),
        (0xa002, PixelXDimension, Long),
        (0xa003, PixelYDimension, Long),
        (0xa004, RelatedSoundFile, Ascii),
        (0xa005, InteroperabilityTag, Long),
        (0xa20b, FlashEnergy, Rational),
        (0xa20c, SpatialFrequencyResponse, Undefined),
        (0xa20e, FocalPlaneXResolution, Rational),
        (0xa20f, FocalPlaneYResolution, Rational),
        (0xa210, FocalPlaneResolutionUnit, Short),
        (0xa214, SubjectLocation, Short),
        (0xa215, ExposureIndex, Rational),
        (0xa217, SensingMethod, Short),
        (0xa300, FileSource, Undefined),
        (0xa301, SceneType, Undefined),
        (0xa302, CFAPattern, Undefined),
        (0xa401, CustomRendered, Short),
        (0xa402, ExposureMode, Short),
        (0xa403, WhiteBalance, Short),
        (0xa404, DigitalZoomRatio, Rational),
        (0xa405, FocalLengthIn35mmFilm, Short),
        (0xa406, SceneCaptureType, Short),
        (0xa407, GainControl, Short),
        (0xa408, Contrast, Short),
        (0xa409, Saturation, Short),
        (0xa40a, Sharpness, Short),
        (0xa40b, DeviceSettingDescription, Undefined),
        (0xa40c, SubjectDistanceRange, Short),
        (0xa420, ImageUniqueID, Ascii),
        (0xa430, CameraOwnerName, Ascii),
        (0xa431, BodySerialNumber, Ascii),
        (0xa432, LensSpecification, Rational),
        (0xa433, LensMake, Ascii),
        (0xa434, LensModel, Ascii),
        (0xa435, LensSerialNumber, Ascii),
        (0xa460, CompositeImage, Short),
        (0xa461, SourceImageNumberOfCompositeImage, Short),
        (0xa462, SourceExposureTimesOfCompositeImage, Undefined),
        (0xa500, Gamma, Rational),
    ],
    Iop => [
        (0x0001, InteroperabilityIndex, Ascii),
        (0x0002, InteroperabilityVersion, Undefined),
        (0x1000, RelatedImageFileFormat, Ascii),
        (0x1001, RelatedImageWidth, Long),
        (0x1002, RelatedImageLength, Long),
    ],
    GpsInfo => [
        (0x0000, GPSVersionID, Byte),
        (0x0001, GPSLatitudeRef, Ascii),
        (0x0002, GPSLatitude, Rational),
        (0x0003, GPSLongitudeRef, Ascii),
        (0x0004, GPSLongitude, Rational),
        (0x0005, GPSAltitudeRef, Byte),
        (0x0006, GPSAltitude, Rational),
        (0x0007, GPSTimeStamp, Rational),
        (0x0008, GPSSatellites, Ascii),
        (0x0009, GPSStatus, Ascii),
        (0x000a, GPSMeasureMode, Ascii),
        (0x000b, GPSDOP, Rational),
        (0x000c, GPSSpeedRef, Ascii),
        (0x000d, GPSSpeed, Rational),
        (0x000e, GPSTrackRef, Ascii),
        (0x000f, GPSTrack, Rational),
        (0x0010, GPSImgDirectionRef, Ascii),
        (0x0011, GPSImgDirection, Rational),
        (0x0012, GPSMapDatum, Ascii),
        (0x0013, GPSDestLatitudeRef, Ascii),
        (0x0014, GPSDestLatitude, Rational),
        (0x0015, GPSDestLongitudeRef, Ascii),
        (0x0016, GPSDestLongitude, Rational),
        (0x0017, GPSDestBearingRef, Ascii),
        (0x0018, GPSDestBearing, Rational),
        (0x0019, GPSDestDistanceRef, Ascii),
        (0x001a, GPSDestDistance, Rational),
        (0x001b, GPSProcessingMethod, Comment),
        (0x001c, GPSAreaInformation, Comment),
        (0x001d, GPSDateStamp, Ascii),
        (0x001e, GPSDifferential, Short),
        (0x001f, GPSHPositioningError, Rational),
    ],
    MpfInfo => [
        (0xb000, MPFVersion, Undefined),
        (0xb001, MPFNumberOfImages, Long),
        (0xb002, MPFImageList, Undefined),
        (0xb003, MPFImageUIDList, Undefined),
        (0xb004, MPFTotalFrames, Long),
        (0xb101, MPFIndividualNum, Long),
        (0xb201, MPFPanOrientation, Long),
        (0xb202, MPFPanOverlapH, Rational),
        (0xb203, MPFPanOverlapV, Rational),
        (0xb204, MPFBaseViewpointNum, Long),
        (0xb205, MPFConvergenceAngle, SRational),
        (0xb206, MPFBaselineLength, Rational),
        (0xb207, MPFVerticalDivergence, SRational),
        (0xb208, MPFAxisDistanceX, SRational),
        (0xb209, MPFAxisDistanceY, SRational),
        (0xb20a, MPFAxisDistanceZ, SRational),
        (0xb20b, MPFYawAngle, SRational),
        (0xb20c, MPFPitchAngle, SRational),
        (0xb20d, MPFRollAngle, SRational),
    ],
}

/// Tags whose payload is a numerator/denominator pair. A `Long` declared tag
/// listed here is decoded as a rational.
pub(crate) const RATIONAL_TAGS: &[u32] = &[
    // GPSInfo
    0x0006, 0x0007, 0x000b, 0x000d, 0x000f, 0x0011, 0x0018, 0x001a, 0x001f,
    // Image
    0x011a, 0x011b, 0x011e, 0x011f, 0x013e, 0x013f, 0x0211, 0x0214, 0x828f,
    0x829a, 0x829d, 0x9102, 0x9201, 0x9202, 0x9203, 0x9204, 0x9205, 0x9206,
    0x920a, 0x920b, 0x920e, 0x920f, 0x9215,
    // DNG
    0xc61a, 0xc61b, 0xc61c, 0xc61e, 0xc621, 0xc622, 0xc623, 0xc624, 0xc625,
    0xc626, 0xc627, 0xc628, 0xc629, 0xc62a, 0xc62b, 0xc62c, 0xc62e, 0xc630,
    0xc631, 0xc632, 0xc633, 0xc65c, 0xc690, 0xc692, 0xc6f7, 0xc714, 0xc715,
    // Photo
    0x9400, 0x9401, 0x9402, 0x9403, 0x9404, 0x9405, 0xa20b, 0xa20e, 0xa20f,
    0xa215, 0xa404, 0xa432, 0xa500,
    // MpfInfo
    0xb202, 0xb203, 0xb205, 0xb206, 0xb207, 0xb208, 0xb209, 0xb20a, 0xb20b,
    0xb20c, 0xb20d,
];

/// GPS coordinate tags stored as degrees/minutes/seconds.
pub(crate) const SEXAGESIMAL_TAGS: &[u32] = &[0x0002, 0x0004, 0x0014, 0x0016];

/// Undefined tags that actually hold short ASCII text such as `0230`.
pub(crate) const TEXT_UNDEFINED_TAGS: &[u32] = &[0x0002, 0x9000, 0xa000, 0xb000];

static TAG_INDEX: LazyLock<HashMap<u32, Vec<&'static TagEntry>>> = LazyLock::new(|| {
    let mut index: HashMap<u32, Vec<&'static TagEntry>> = HashMap::new();
    for entry in TAG_TABLE {
        index.entry(entry.id).or_default().push(entry);
    }
    index
});

/// All table entries for `id`, in declaration order. Empty if `id` is
/// unrecognized.
pub fn lookup_tag(id: u32) -> &'static [&'static TagEntry] {
    TAG_INDEX.get(&id).map(Vec::as_slice).unwrap_or(&[])
}

/// The whole dispatch table, in declaration order.
pub fn tag_table() -> &'static [TagEntry] {
    TAG_TABLE
}

pub fn is_rational_tag(id: u32) -> bool {
    RATIONAL_TAGS.contains(&id)
}

pub fn is_sexagesimal_tag(id: u32) -> bool {
    SEXAGESIMAL_TAGS.contains(&id)
}

pub(crate) fn is_text_undefined_tag(id: u32) -> bool {
    TEXT_UNDEFINED_TAGS.contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test_case(0x010f, &[(ExifGroup::Image, "Make")])]
    #[test_case(0x829d, &[(ExifGroup::Image, "FNumber"), (ExifGroup::Photo, "FNumber")])]
    #[test_case(0x9003, &[(ExifGroup::Image, "DateTimeOriginal"), (ExifGroup::Photo, "DateTimeOriginal")])]
    #[test_case(0x9214, &[(ExifGroup::Image, "SubjectLocation"), (ExifGroup::Photo, "SubjectArea")])]
    #[test_case(0x0002, &[(ExifGroup::Iop, "InteroperabilityVersion"), (ExifGroup::GpsInfo, "GPSLatitude")])]
    #[test_case(0xb001, &[(ExifGroup::MpfInfo, "MPFNumberOfImages")])]
    #[test_case(99999, &[])]
    fn lookup(id: u32, expect: &[(ExifGroup, &str)]) {
        let found = lookup_tag(id)
            .iter()
            .map(|e| (e.group, e.name))
            .collect::<Vec<_>>();
        assert_eq!(found, expect);
    }

    #[test]
    fn no_duplicate_rows() {
        let mut seen = HashSet::new();
        for entry in tag_table() {
            assert!(
                seen.insert((entry.id, entry.group)),
                "duplicate row {:#06x} {}",
                entry.id,
                entry.group
            );
        }
        assert!(tag_table().len() > 250);
    }

    #[test]
    fn classification_sets_are_exclusive() {
        for id in RATIONAL_TAGS {
            assert!(!is_sexagesimal_tag(*id), "{id:#06x} is in both sets");
        }
    }

    #[test]
    fn classification_sets_match_table() {
        let rational_rows = tag_table()
            .iter()
            .filter(|e| matches!(e.value_type, ValueType::Rational | ValueType::SRational))
            .map(|e| e.id)
            .collect::<HashSet<_>>();

        for id in &rational_rows {
            assert!(
                is_rational_tag(*id) || is_sexagesimal_tag(*id),
                "{id:#06x} is missing from the classification sets"
            );
        }
        for id in RATIONAL_TAGS.iter().chain(SEXAGESIMAL_TAGS) {
            assert!(
                rational_rows.contains(id),
                "{id:#06x} has no rational table row"
            );
        }
    }

    #[test]
    fn group_names() {
        assert_eq!(ExifGroup::GpsInfo.to_string(), "GPSInfo");
        assert_eq!("MpfInfo".parse::<ExifGroup>().unwrap(), ExifGroup::MpfInfo);
        assert!("Maker".parse::<ExifGroup>().is_err());
        assert_eq!(ValueType::SRational.to_string(), "SRational");
    }
}
