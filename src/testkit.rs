//! Builders for synthetic TIFF / JPEG blobs used by the unit tests.

use nom::number::Endianness;

#[derive(Debug, Clone)]
enum Values {
    Bytes(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    /// Offset of another IFD of the same builder, filled in at build time.
    IfdPointer(usize),
    /// Written as is into the value/offset field.
    Offset(u32),
}

#[derive(Debug, Clone)]
pub struct Entry {
    tag: u16,
    format: u16,
    count: u32,
    values: Values,
}

impl Entry {
    pub fn raw(tag: u16, format: u16, count: u32, data: Vec<u8>) -> Self {
        Self {
            tag,
            format,
            count,
            values: Values::Bytes(data),
        }
    }

    pub fn ascii(tag: u16, s: &str) -> Self {
        let mut data = s.as_bytes().to_vec();
        data.push(0);
        Self::raw(tag, 2, data.len() as u32, data)
    }

    pub fn byte(tag: u16, data: &[u8]) -> Self {
        Self::raw(tag, 1, data.len() as u32, data.to_vec())
    }

    pub fn undefined(tag: u16, data: &[u8]) -> Self {
        Self::raw(tag, 7, data.len() as u32, data.to_vec())
    }

    pub fn short(tag: u16, values: &[u16]) -> Self {
        Self {
            tag,
            format: 3,
            count: values.len() as u32,
            values: Values::U16(values.to_vec()),
        }
    }

    pub fn long(tag: u16, values: &[u32]) -> Self {
        Self {
            tag,
            format: 4,
            count: values.len() as u32,
            values: Values::U32(values.to_vec()),
        }
    }

    pub fn rational(tag: u16, values: &[(u32, u32)]) -> Self {
        Self {
            tag,
            format: 5,
            count: values.len() as u32,
            values: Values::U32(values.iter().flat_map(|(n, d)| [*n, *d]).collect()),
        }
    }

    pub fn srational(tag: u16, values: &[(i32, i32)]) -> Self {
        Self {
            tag,
            format: 10,
            count: values.len() as u32,
            values: Values::I32(values.iter().flat_map(|(n, d)| [*n, *d]).collect()),
        }
    }

    /// An entry whose value offset points wherever `offset` says.
    pub fn out_of_range(tag: u16, format: u16, count: u32, offset: u32) -> Self {
        Self {
            tag,
            format,
            count,
            values: Values::Offset(offset),
        }
    }

    fn pointer(tag: u16, ifd: usize) -> Self {
        Self {
            tag,
            format: 4,
            count: 1,
            values: Values::IfdPointer(ifd),
        }
    }

    fn data(&self, endian: Endianness, ifd_offsets: &[u32]) -> Vec<u8> {
        match &self.values {
            Values::Bytes(v) => v.clone(),
            Values::U16(v) => v.iter().flat_map(|x| u16_bytes(*x, endian)).collect(),
            Values::U32(v) => v.iter().flat_map(|x| u32_bytes(*x, endian)).collect(),
            Values::I32(v) => v
                .iter()
                .flat_map(|x| u32_bytes(*x as u32, endian))
                .collect(),
            Values::IfdPointer(i) => u32_bytes(ifd_offsets[*i], endian).to_vec(),
            Values::Offset(o) => u32_bytes(*o, endian).to_vec(),
        }
    }

    fn is_inline(&self) -> bool {
        match &self.values {
            Values::Offset(_) => true,
            Values::Bytes(v) => v.len() <= 4,
            Values::U16(v) => v.len() <= 2,
            Values::U32(v) => v.len() <= 1,
            Values::I32(v) => v.len() <= 1,
            Values::IfdPointer(_) => true,
        }
    }

    fn external_len(&self) -> usize {
        if self.is_inline() {
            0
        } else {
            let len = match &self.values {
                Values::Bytes(v) => v.len(),
                Values::U16(v) => v.len() * 2,
                Values::U32(v) => v.len() * 4,
                Values::I32(v) => v.len() * 4,
                Values::IfdPointer(_) | Values::Offset(_) => 0,
            };
            len + len % 2
        }
    }
}

fn u16_bytes(x: u16, endian: Endianness) -> [u8; 2] {
    match endian {
        Endianness::Big => x.to_be_bytes(),
        _ => x.to_le_bytes(),
    }
}

fn u32_bytes(x: u32, endian: Endianness) -> [u8; 4] {
    match endian {
        Endianness::Big => x.to_be_bytes(),
        _ => x.to_le_bytes(),
    }
}

const IFD0: usize = 0;
const EXIF: usize = 1;
const GPS: usize = 2;
const INTEROP: usize = 3;
const IFD1: usize = 4;

/// Lays out a TIFF block: header, then IFD0, Exif, GPS, Interop and IFD1,
/// each followed by its out-of-line values. Sub-IFD pointer entries are added
/// automatically for non-empty sub-IFDs, and a non-empty IFD1 is chained as
/// the next IFD of IFD0.
#[derive(Debug, Clone)]
pub struct TiffBuilder {
    endian: Endianness,
    ifds: [Vec<Entry>; 5],
}

impl TiffBuilder {
    pub fn new(endian: Endianness) -> Self {
        Self {
            endian,
            ifds: Default::default(),
        }
    }

    pub fn ifd0(mut self, entries: Vec<Entry>) -> Self {
        self.ifds[IFD0] = entries;
        self
    }

    pub fn exif(mut self, entries: Vec<Entry>) -> Self {
        self.ifds[EXIF] = entries;
        self
    }

    pub fn gps(mut self, entries: Vec<Entry>) -> Self {
        self.ifds[GPS] = entries;
        self
    }

    pub fn interop(mut self, entries: Vec<Entry>) -> Self {
        self.ifds[INTEROP] = entries;
        self
    }

    /// Thumbnail directory, linked through the next-IFD offset of IFD0.
    pub fn ifd1(mut self, entries: Vec<Entry>) -> Self {
        self.ifds[IFD1] = entries;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut ifds = self.ifds.clone();
        if !ifds[EXIF].is_empty() || !ifds[INTEROP].is_empty() {
            ifds[IFD0].push(Entry::pointer(0x8769, EXIF));
        }
        if !ifds[GPS].is_empty() {
            ifds[IFD0].push(Entry::pointer(0x8825, GPS));
        }
        if !ifds[INTEROP].is_empty() {
            ifds[EXIF].push(Entry::pointer(0xa005, INTEROP));
        }
        for ifd in ifds.iter_mut() {
            ifd.sort_by_key(|e| e.tag);
        }

        let block_len =
            |ifd: &[Entry]| 2 + ifd.len() * 12 + 4 + ifd.iter().map(Entry::external_len).sum::<usize>();

        let mut ifd_offsets = [0u32; 5];
        let mut offset = 8;
        for (i, ifd) in ifds.iter().enumerate() {
            if i != IFD0 && ifd.is_empty() {
                continue;
            }
            ifd_offsets[i] = offset as u32;
            offset += block_len(ifd);
        }

        let endian = self.endian;
        let mut buf = match endian {
            Endianness::Big => b"MM\0\x2a".to_vec(),
            _ => b"II\x2a\0".to_vec(),
        };
        buf.extend(u32_bytes(8, endian));

        for (i, ifd) in ifds.iter().enumerate() {
            if i != IFD0 && ifd.is_empty() {
                continue;
            }
            assert_eq!(buf.len(), ifd_offsets[i] as usize);

            let mut external_pos = buf.len() + 2 + ifd.len() * 12 + 4;
            let mut external = Vec::new();

            buf.extend(u16_bytes(ifd.len() as u16, endian));
            for entry in ifd {
                buf.extend(u16_bytes(entry.tag, endian));
                buf.extend(u16_bytes(entry.format, endian));
                buf.extend(u32_bytes(entry.count, endian));

                let mut data = entry.data(endian, &ifd_offsets);
                if entry.is_inline() {
                    data.resize(4, 0);
                    buf.extend(data);
                } else {
                    buf.extend(u32_bytes(external_pos as u32, endian));
                    if data.len() % 2 == 1 {
                        data.push(0);
                    }
                    external_pos += data.len();
                    external.extend(data);
                }
            }
            let next = if i == IFD0 { ifd_offsets[IFD1] } else { 0 };
            buf.extend(u32_bytes(next, endian));
            buf.extend(external);
        }

        buf
    }
}

/// A JPEG with the given APP1 Exif and APP2 MPF TIFF blocks.
pub fn jpeg(exif: Option<&[u8]>, mpf: Option<&[u8]>) -> Vec<u8> {
    let mut buf = vec![0xff, 0xd8];

    let mut segment = |marker: u8, payload: &[u8]| {
        buf.extend([0xff, marker]);
        buf.extend(((payload.len() + 2) as u16).to_be_bytes());
        buf.extend(payload);
    };

    segment(0xe0, b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");
    if let Some(exif) = exif {
        segment(0xe1, &[b"Exif\0\0".as_slice(), exif].concat());
    }
    if let Some(mpf) = mpf {
        segment(0xe2, &[b"MPF\0".as_slice(), mpf].concat());
    }
    segment(0xdb, &[0; 65]);
    segment(0xda, &[1, 1, 0, 0, 0x3f, 0]);

    buf.extend([0x12, 0x34, 0xff, 0x00, 0x56]);
    buf.extend([0xff, 0xd9]);
    buf
}
