//! Domain names and the label codec (RFC 1035 §3.1, §4.1.4).
//!
//! Decoding follows compression pointers; encoding always writes literal
//! labels. A pointer must target an offset strictly before the previous
//! jump (or before itself, for the first jump), so every chain terminates.
//! Jump depth is also capped to keep recursion shallow on hostile input.

use crate::wire;
use crate::DomainError;
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const LABEL_TYPE_MASK: u8 = 0xC0;
const POINTER_MARKER: u8 = 0xC0;
const POINTER_OFFSET_MASK: u16 = 0x3FFF;
const MAX_POINTER_JUMPS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomainName {
    labels: Vec<String>,
}

impl DomainName {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = Self {
            labels: labels.into_iter().map(Into::into).collect(),
        };
        name.validate()?;
        Ok(name)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of the literal (uncompressed) wire form, terminator included.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Decodes a name at `offset`, returning it with the offset just past
    /// the name's own bytes (2 bytes past a pointer, not past its target).
    ///
    /// Labels must be valid UTF-8; any other label bytes fail with
    /// `InvalidDomainName`, so a datagram carrying them is dropped rather
    /// than relayed.
    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let mut reader = NameReader {
            buf,
            labels: Vec::new(),
            wire_len: 1,
            jumps: 0,
        };
        let next = reader.read(offset, offset)?;
        Ok((
            Self {
                labels: reader.labels,
            },
            next,
        ))
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        self.validate()?;
        for label in &self.labels {
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
        out.push(0);
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = Vec::with_capacity(self.wire_len());
        self.encode_into(&mut out)?;
        Ok(out)
    }

    fn validate(&self) -> Result<(), DomainError> {
        for label in &self.labels {
            if label.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "empty label in '{}'",
                    self
                )));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' is {} bytes, limit is {}",
                    label,
                    label.len(),
                    MAX_LABEL_LEN
                )));
            }
        }
        if self.wire_len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "name is {} bytes, limit is {}",
                self.wire_len(),
                MAX_NAME_LEN
            )));
        }
        Ok(())
    }
}

struct NameReader<'a> {
    buf: &'a [u8],
    labels: Vec<String>,
    wire_len: usize,
    jumps: usize,
}

impl NameReader<'_> {
    /// Reads labels starting at `pos`. Any pointer met in this segment must
    /// target an offset below `bound`.
    fn read(&mut self, mut pos: usize, bound: usize) -> Result<usize, DomainError> {
        loop {
            let len = wire::read_u8(self.buf, pos)?;
            match len & LABEL_TYPE_MASK {
                0 if len == 0 => return Ok(pos + 1),
                0 => {
                    let len = usize::from(len);
                    let bytes = wire::slice(self.buf, pos + 1, len)?;
                    self.push_label(bytes)?;
                    pos += len + 1;
                }
                POINTER_MARKER => {
                    let target = usize::from(wire::read_u16(self.buf, pos)? & POINTER_OFFSET_MASK);
                    let limit = bound.min(pos);
                    if target >= limit {
                        return Err(DomainError::MalformedPointer {
                            offset: pos,
                            reason: "pointer does not point backwards",
                        });
                    }
                    self.jumps += 1;
                    if self.jumps > MAX_POINTER_JUMPS {
                        return Err(DomainError::MalformedPointer {
                            offset: pos,
                            reason: "too many compression jumps",
                        });
                    }
                    self.read(target, target)?;
                    return Ok(pos + 2);
                }
                _ => {
                    return Err(DomainError::MalformedPointer {
                        offset: pos,
                        reason: "reserved label type",
                    })
                }
            }
        }
    }

    fn push_label(&mut self, bytes: &[u8]) -> Result<(), DomainError> {
        self.wire_len += bytes.len() + 1;
        if self.wire_len > MAX_NAME_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "decoded name exceeds {} bytes",
                MAX_NAME_LEN
            )));
        }
        let label = std::str::from_utf8(bytes)
            .map_err(|_| DomainError::InvalidDomainName("label is not valid UTF-8".to_string()))?;
        self.labels.push(label.to_string());
        Ok(())
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        f.write_str(&self.labels.join("."))
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        Self::new(trimmed.split('.'))
    }
}
