use bytes::Bytes;
use nom::{
    bytes::complete::{tag, take, take_while1},
    combinator::fail,
    number, IResult,
};

pub(crate) const EXIF_IDENT: &[u8] = b"Exif\0\0";
pub(crate) const MPF_IDENT: &[u8] = b"MPF\0";

/// The TIFF blocks carried by a JPEG file.
#[derive(Debug, Clone, Default)]
pub(crate) struct JpegMetadata {
    /// Payload of the first APP1 `Exif` segment, without the ident.
    pub exif: Option<Bytes>,
    /// Payload of the first APP2 `MPF` segment, without the ident.
    pub mpf: Option<Bytes>,
}

/// Extract the Exif and MPF TIFF blocks of a JPEG file, without copying.
pub(crate) fn extract_metadata(input: &Bytes) -> crate::Result<JpegMetadata> {
    let (exif, mpf) = find_metadata_segments(input)?;
    Ok(JpegMetadata {
        exif: exif.map(|x| input.slice_ref(x)),
        mpf: mpf.map(|x| input.slice_ref(x)),
    })
}

type MetadataSegments<'a> = (Option<&'a [u8]>, Option<&'a [u8]>);

#[tracing::instrument(skip_all)]
fn find_metadata_segments(input: &[u8]) -> crate::Result<MetadataSegments<'_>> {
    let remain = parse_soi(input)?;

    let mut exif = None;
    let mut mpf = None;
    travel_until(remain, |segment| {
        match segment.marker_code {
            c if c == MarkerCode::APP1.code() && exif.is_none() => {
                exif = segment.payload.strip_prefix(EXIF_IDENT);
            }
            c if c == MarkerCode::APP2.code() && mpf.is_none() => {
                mpf = segment.payload.strip_prefix(MPF_IDENT);
            }
            _ => (),
        }
        exif.is_some() && mpf.is_some()
    });

    Ok((exif, mpf))
}

pub(crate) fn check_jpeg(input: &[u8]) -> crate::Result<()> {
    parse_soi(input).map(|_| ())
}

fn parse_soi(input: &[u8]) -> crate::Result<&[u8]> {
    // check soi marker [0xff, 0xd8]
    let (remain, code) = marker(input)?;

    // SOI has no payload
    if code != MarkerCode::Soi.code() {
        return Err("invalid JPEG file; SOI marker not found".into());
    }
    Ok(remain)
}

/// Whether the JPEG file carries an APP1 `Exif` segment.
pub(crate) fn check_jpeg_exif(input: &[u8]) -> bool {
    find_metadata_segments(input).is_ok_and(|(exif, _)| exif.is_some())
}

struct Segment<'a> {
    marker_code: u8,
    payload: &'a [u8],
}

/// Visit segments until `predicate` returns true, or the scan data / end of
/// image is reached. A malformed segment ends the walk.
fn travel_until<'a, F>(input: &'a [u8], mut predicate: F)
where
    F: FnMut(&Segment<'a>) -> bool,
{
    let mut remain = input;

    loop {
        let (rem, code) = match marker(remain) {
            Ok(x) => x,
            Err(e) => {
                tracing::warn!(?e, "JPEG marker not found; segment walk stopped");
                return;
            }
        };

        // Stop searching at SOS
        if code == MarkerCode::Sos.code() || code == MarkerCode::Eoi.code() {
            return;
        }

        let (rem, segment) = match parse_segment(code, rem) {
            Ok(x) => x,
            Err(e) => {
                tracing::warn!(marker = code, ?e, "JPEG segment is truncated");
                return;
            }
        };
        remain = rem;
        tracing::debug!(marker = segment.marker_code, len = segment.payload.len(), "Got segment.");

        if predicate(&segment) {
            return;
        }
    }
}

/// `0xFF` fill bytes followed by a marker code.
fn marker(input: &[u8]) -> IResult<&[u8], u8> {
    let (remain, _) = take_while1(|b: u8| b == 0xFF)(input)?;
    number::complete::u8(remain)
}

fn parse_segment(marker_code: u8, input: &[u8]) -> IResult<&[u8], Segment<'_>> {
    let remain = input;

    if !MarkerCode::has_payload(marker_code) {
        Ok((
            remain,
            Segment {
                marker_code,
                payload: b"",
            },
        ))
    } else {
        let (remain, size) = number::complete::be_u16(remain)?;
        if size < 2 {
            return fail(remain);
        }
        // size contains the two bytes of `size` itself
        let (remain, data) = take(size - 2)(remain)?;
        Ok((
            remain,
            Segment {
                marker_code,
                payload: data,
            },
        ))
    }
}

/// Whether `input` starts with the bare `Exif\0\0` ident.
pub(crate) fn check_exif_ident(input: &[u8]) -> bool {
    tag::<_, _, nom::error::Error<_>>(EXIF_IDENT)(input).is_ok()
}

/// A marker code is a byte following 0xFF that indicates the kind of marker.
enum MarkerCode {
    // Start of Image
    Soi = 0xD8,

    // APP1 marker, Exif
    APP1 = 0xE1,

    // APP2 marker, ICC profile or MPF
    APP2 = 0xE2,

    // Start of Scan
    Sos = 0xDA,

    // End of Image
    Eoi = 0xD9,
}

impl MarkerCode {
    fn code(self) -> u8 {
        self as u8
    }

    /// SOI, EOI, TEM and RSTn are standalone markers.
    fn has_payload(code: u8) -> bool {
        !matches!(code, 0x01 | 0xD0..=0xD9)
    }
}
