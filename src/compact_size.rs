//! Bitcoin CompactSize (VarInt) encoding.
//! Used as the script length prefix of a serialized TapLeaf.

use alloc::vec::Vec;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::MastError;

/// Number of bytes `n` occupies as a CompactSize.
#[inline]
pub const fn compact_size_len(n: u64) -> usize {
    if n < 0xfd {
        1
    } else if n <= 0xffff {
        3
    } else if n <= 0xffff_ffff {
        5
    } else {
        9
    }
}

/// Encodes `n` as Bitcoin CompactSize and appends to `buf`.
/// 0–252: 1 byte; 253–0xFFFF: 0xFD + 2B LE; 0x10000–0xFFFFFFFF: 0xFE + 4B LE; else 0xFF + 8B LE.
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    match compact_size_len(n) {
        1 => buf.push(n as u8),
        3 => {
            let mut b = [0u8; 2];
            LittleEndian::write_u16(&mut b, n as u16);
            buf.push(0xfd);
            buf.extend_from_slice(&b);
        }
        5 => {
            let mut b = [0u8; 4];
            LittleEndian::write_u32(&mut b, n as u32);
            buf.push(0xfe);
            buf.extend_from_slice(&b);
        }
        _ => {
            let mut b = [0u8; 8];
            LittleEndian::write_u64(&mut b, n);
            buf.push(0xff);
            buf.extend_from_slice(&b);
        }
    }
}

/// Decodes a CompactSize from the start of `data`.
///
/// Returns `(value, bytes_consumed)`. Rejects truncated input and encodings that are
/// longer than the value requires, so every length has exactly one byte form.
pub fn read_compact_size(data: &[u8]) -> Result<(u64, usize), MastError> {
    let (&marker, rest) = data.split_first().ok_or(MastError::IncompleteData)?;
    let (value, width) = match marker {
        0xfd => (read_le(rest, 2)?, 3),
        0xfe => (read_le(rest, 4)?, 5),
        0xff => (read_le(rest, 8)?, 9),
        b => return Ok((b as u64, 1)),
    };
    if compact_size_len(value) != width {
        return Err(MastError::NonCanonicalCompactSize);
    }
    Ok((value, width))
}

fn read_le(data: &[u8], width: usize) -> Result<u64, MastError> {
    if data.len() < width {
        return Err(MastError::IncompleteData);
    }
    Ok(LittleEndian::read_uint(&data[..width], width))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn encode(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_compact_size(&mut buf, n);
        buf
    }

    #[test]
    fn boundaries_use_the_shortest_form() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(252), vec![0xfc]);
        assert_eq!(encode(253), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(encode(300), vec![0xfd, 0x2c, 0x01]);
        assert_eq!(encode(0xffff), vec![0xfd, 0xff, 0xff]);
        assert_eq!(encode(0x1_0000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(encode(0x1_0000_0000).len(), 9);
    }

    #[test]
    fn read_reports_consumed_width() {
        assert_eq!(read_compact_size(&[0x3c, 0xaa]), Ok((60, 1)));
        assert_eq!(read_compact_size(&[0xfd, 0x2c, 0x01, 0xaa]), Ok((300, 3)));
        assert_eq!(
            read_compact_size(&[0xfe, 0x00, 0x00, 0x01, 0x00]),
            Ok((0x1_0000, 5))
        );
    }

    #[test]
    fn read_rejects_truncated_and_non_canonical() {
        assert_eq!(read_compact_size(&[]), Err(MastError::IncompleteData));
        assert_eq!(read_compact_size(&[0xfd, 0x01]), Err(MastError::IncompleteData));
        // 60 fits in one byte; the 0xfd form is not canonical.
        assert_eq!(
            read_compact_size(&[0xfd, 0x3c, 0x00]),
            Err(MastError::NonCanonicalCompactSize)
        );
    }
}
