//! Bounds-checked big-endian readers shared by the message codecs.
//!
//! Every read validates the full span against the buffer before slicing, so
//! a short or lying datagram surfaces as [`DomainError::TruncatedInput`]
//! instead of a panic.

use crate::DomainError;

pub(crate) fn slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], DomainError> {
    let end = offset.checked_add(len).filter(|&end| end <= buf.len());
    match end {
        Some(end) => Ok(&buf[offset..end]),
        None => Err(DomainError::TruncatedInput {
            offset,
            needed: len,
            available: buf.len(),
        }),
    }
}

pub(crate) fn read_u8(buf: &[u8], offset: usize) -> Result<u8, DomainError> {
    Ok(slice(buf, offset, 1)?[0])
}

pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<u16, DomainError> {
    let b = slice(buf, offset, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32, DomainError> {
    let b = slice(buf, offset, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_big_endian() {
        assert_eq!(read_u16(&[0x12, 0x34], 0).unwrap(), 0x1234);
    }

    #[test]
    fn test_read_u32_big_endian() {
        assert_eq!(read_u32(&[0, 0, 0, 0x3c], 0).unwrap(), 60);
    }

    #[test]
    fn test_slice_past_end_is_truncated() {
        let err = slice(&[1, 2, 3], 2, 2).unwrap_err();
        assert_eq!(
            err,
            DomainError::TruncatedInput {
                offset: 2,
                needed: 2,
                available: 3
            }
        );
    }

    #[test]
    fn test_slice_offset_overflow_is_truncated() {
        assert!(slice(&[1, 2, 3], usize::MAX, 2).is_err());
    }
}
