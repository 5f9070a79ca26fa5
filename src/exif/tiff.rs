use std::{
    collections::{BTreeMap, HashSet, VecDeque},
    fmt::Debug,
    ops::Range,
};

use bytes::Bytes;
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator,
    number::{complete, Endianness},
    sequence, IResult,
};

use super::reader::PropertyItem;
use crate::{error::convert_parse_error, values::DataFormat};

pub(crate) const TIFF_HEADER_LEN: usize = 8;
pub(crate) const IFD_ENTRY_SIZE: usize = 12;

const EXIF_IFD_TAG: u16 = 0x8769;
const GPS_IFD_TAG: u16 = 0x8825;
const INTEROP_IFD_TAG: u16 = 0xa005;

/// TIFF Header
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct TiffHeader {
    pub endian: Endianness,
    pub ifd0_offset: u32,
}

impl Debug for TiffHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let endian_str = match self.endian {
            Endianness::Big => "Big",
            Endianness::Little => "Little",
            Endianness::Native => "Native",
        };
        f.debug_struct("TiffHeader")
            .field("endian", &endian_str)
            .field("ifd0_offset", &format!("{:#x}", self.ifd0_offset))
            .finish()
    }
}

impl TiffHeader {
    pub fn parse(input: &[u8]) -> IResult<&[u8], TiffHeader> {
        let (remain, endian) = TiffHeader::parse_endian(input)?;
        let (remain, (_, offset)) = sequence::tuple((
            combinator::verify(complete::u16(endian), |magic: &u16| *magic == 0x2a),
            complete::u32(endian),
        ))(remain)?;

        let header = Self {
            endian,
            ifd0_offset: offset,
        };

        Ok((remain, header))
    }

    fn parse_endian(input: &[u8]) -> IResult<&[u8], Endianness> {
        combinator::map(alt((tag("MM"), tag("II"))), |endian_marker: &[u8]| {
            if endian_marker == b"MM" {
                Endianness::Big
            } else {
                Endianness::Little
            }
        })(input)
    }
}

/// The directories whose entries become property items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IfdKind {
    Ifd0,
    Exif,
    Gps,
    Interop,
    /// The MP Index IFD of a JPEG APP2 `MPF` block.
    Mpf,
}

impl IfdKind {
    fn sub_ifd(self, tag: u16) -> Option<IfdKind> {
        match (self, tag) {
            (IfdKind::Ifd0, EXIF_IFD_TAG) => Some(IfdKind::Exif),
            (IfdKind::Ifd0, GPS_IFD_TAG) => Some(IfdKind::Gps),
            (IfdKind::Exif, INTEROP_IFD_TAG) => Some(IfdKind::Interop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct EntryHeader {
    tag: u16,
    data_format: u16,
    components_num: u32,
    value_or_offset: u32,
}

impl EntryHeader {
    fn parse(input: &[u8], endian: Endianness) -> IResult<&[u8], EntryHeader> {
        combinator::map(
            sequence::tuple((
                complete::u16(endian),
                complete::u16(endian),
                complete::u32(endian),
                complete::u32(endian),
            )),
            |(tag, data_format, components_num, value_or_offset)| EntryHeader {
                tag,
                data_format,
                components_num,
                value_or_offset,
            },
        )(input)
    }
}

/// Walks the IFD chain of one TIFF block and collects its entries as
/// little-endian property items.
///
/// Offsets are relative to the start of `tiff`, which must begin with the
/// TIFF header.
pub(crate) struct IfdWalker<'a> {
    tiff: &'a Bytes,
    endian: Endianness,
    visited: HashSet<u32>,
}

impl<'a> IfdWalker<'a> {
    /// Walk the block, inserting each entry into `items` unless its id is
    /// already present.
    #[tracing::instrument(skip_all, fields(len = tiff.len(), first = ?first))]
    pub fn collect(
        tiff: &'a Bytes,
        first: IfdKind,
        items: &mut BTreeMap<u32, PropertyItem>,
    ) -> crate::Result<()> {
        let (_, header) = TiffHeader::parse(tiff)
            .map_err(|e| convert_parse_error(e, "invalid TIFF header"))?;
        tracing::debug!(?header, "TIFF header");

        let ifd0_end = (header.ifd0_offset as usize).saturating_add(2);
        if (header.ifd0_offset as usize) < TIFF_HEADER_LEN || ifd0_end > tiff.len() {
            return Err(format!(
                "invalid TIFF header; IFD0 offset {:#x} is out of range",
                header.ifd0_offset
            )
            .into());
        }

        let mut walker = IfdWalker {
            tiff,
            endian: header.endian,
            visited: HashSet::new(),
        };

        let mut queue = VecDeque::from([(first, header.ifd0_offset)]);
        while let Some((kind, offset)) = queue.pop_front() {
            if !walker.visited.insert(offset) {
                tracing::warn!(?kind, offset, "IFD already visited; loop ignored");
                continue;
            }
            walker.walk_ifd(kind, offset, items, &mut queue);
        }

        Ok(())
    }

    fn walk_ifd(
        &self,
        kind: IfdKind,
        offset: u32,
        items: &mut BTreeMap<u32, PropertyItem>,
        queue: &mut VecDeque<(IfdKind, u32)>,
    ) {
        let Some(ifd) = self.tiff.get(offset as usize..) else {
            tracing::warn!(?kind, offset, "IFD offset out of range");
            return;
        };
        let (mut remain, num) = match complete::u16::<_, nom::error::Error<_>>(self.endian)(ifd) {
            Ok(x) => x,
            Err(e) => {
                tracing::warn!(?kind, offset, ?e, "IFD entry number not found");
                return;
            }
        };
        tracing::debug!(?kind, offset, num, "walk IFD");

        for i in 0..num as usize {
            let (rem, entry) = match EntryHeader::parse(remain, self.endian) {
                Ok(x) => x,
                Err(_) => {
                    tracing::warn!(?kind, offset, index = i, num, "IFD is truncated");
                    break;
                }
            };
            remain = rem;

            let entry_pos = offset as usize + 2 + i * IFD_ENTRY_SIZE;
            if let Some(sub) = kind.sub_ifd(entry.tag) {
                queue.push_back((sub, entry.value_or_offset));
            }

            let Some(item) = self.entry_item(&entry, entry_pos) else {
                continue;
            };
            match items.entry(item.id) {
                std::collections::btree_map::Entry::Vacant(v) => {
                    v.insert(item);
                }
                std::collections::btree_map::Entry::Occupied(_) => {
                    tracing::debug!(tag = entry.tag, ?kind, "duplicated tag ignored");
                }
            }
        }
    }

    fn entry_item(&self, entry: &EntryHeader, entry_pos: usize) -> Option<PropertyItem> {
        let data_format = match DataFormat::try_from(entry.data_format) {
            Ok(df) => df,
            Err(e) => {
                tracing::warn!(tag = entry.tag, %e, "Ignored: IFD entry data format error");
                return None;
            }
        };

        let Some(range) = self.entry_data_range(entry, data_format, entry_pos) else {
            tracing::warn!(
                tag = entry.tag,
                components_num = entry.components_num,
                value_or_offset = entry.value_or_offset,
                "Ignored: IFD entry data out of range"
            );
            return None;
        };

        Some(PropertyItem {
            id: entry.tag as u32,
            raw: normalize(self.tiff, range, data_format, self.endian),
        })
    }

    fn entry_data_range(
        &self,
        entry: &EntryHeader,
        data_format: DataFormat,
        entry_pos: usize,
    ) -> Option<Range<usize>> {
        let size = (entry.components_num as usize).checked_mul(data_format.component_size())?;
        let start = if size > 4 {
            entry.value_or_offset as usize
        } else {
            // value is stored inline, after tag, format and count
            entry_pos + 8
        };
        let end = start.checked_add(size)?;
        (end <= self.tiff.len()).then_some(start..end)
    }
}

/// Slice `range` out of `tiff`, byte swapping each component if the block is
/// big-endian.
fn normalize(tiff: &Bytes, range: Range<usize>, data_format: DataFormat, endian: Endianness) -> Bytes {
    let data = tiff.slice(range);
    let unit = data_format.swap_unit();
    if unit == 1 || matches!(endian, Endianness::Little) {
        return data;
    }

    let mut buf = data.to_vec();
    buf.chunks_exact_mut(unit).for_each(|c| c.reverse());
    Bytes::from(buf)
}
