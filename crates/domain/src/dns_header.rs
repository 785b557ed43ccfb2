//! DNS message header (RFC 1035 §4.1.1)
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |            QDCOUNT / ANCOUNT / NSCOUNT / ARCOUNT
//! ```

use crate::wire;
use crate::DomainError;
use std::fmt;

pub const HEADER_LEN: usize = 12;

pub const OPCODE_QUERY: u8 = 0;

const QR_MASK: u16 = 0x8000;
const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0F << OPCODE_SHIFT;
const AA_MASK: u16 = 0x0400;
const TC_MASK: u16 = 0x0200;
const RD_MASK: u16 = 0x0100;
const RA_MASK: u16 = 0x0080;
const Z_SHIFT: u16 = 4;
const Z_MASK: u16 = 0x07 << Z_SHIFT;
const RCODE_MASK: u16 = 0x000F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl ResponseCode {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::FormErr => 1,
            Self::ServFail => 2,
            Self::NxDomain => 3,
            Self::NotImp => 4,
            Self::Refused => 5,
            Self::Other(code) => code & 0x0F,
        }
    }

    pub fn from_u8(code: u8) -> Self {
        match code & 0x0F {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NxDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            other => Self::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NxDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "RCODE{}", code),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// The fixed 12-byte header. Flags live in one packed word; every setter
/// clears its own bit range before writing so neighbouring fields survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Header {
    pub id: u16,
    flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        wire::slice(buf, 0, HEADER_LEN)?;
        Ok(Self {
            id: wire::read_u16(buf, 0)?,
            flags: wire::read_u16(buf, 2)?,
            question_count: wire::read_u16(buf, 4)?,
            answer_count: wire::read_u16(buf, 6)?,
            authority_count: wire::read_u16(buf, 8)?,
            additional_count: wire::read_u16(buf, 10)?,
        })
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let fields = [
            self.id,
            self.flags,
            self.question_count,
            self.answer_count,
            self.authority_count,
            self.additional_count,
        ];
        for (chunk, field) in out.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }
        out
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn qr(&self) -> bool {
        self.flag(QR_MASK)
    }

    pub fn set_qr(&mut self, on: bool) {
        self.set_flag(QR_MASK, on);
    }

    pub fn opcode(&self) -> u8 {
        self.field(OPCODE_MASK, OPCODE_SHIFT)
    }

    pub fn set_opcode(&mut self, opcode: u8) {
        self.set_field(OPCODE_MASK, OPCODE_SHIFT, opcode);
    }

    pub fn aa(&self) -> bool {
        self.flag(AA_MASK)
    }

    pub fn set_aa(&mut self, on: bool) {
        self.set_flag(AA_MASK, on);
    }

    pub fn tc(&self) -> bool {
        self.flag(TC_MASK)
    }

    pub fn set_tc(&mut self, on: bool) {
        self.set_flag(TC_MASK, on);
    }

    pub fn rd(&self) -> bool {
        self.flag(RD_MASK)
    }

    pub fn set_rd(&mut self, on: bool) {
        self.set_flag(RD_MASK, on);
    }

    pub fn ra(&self) -> bool {
        self.flag(RA_MASK)
    }

    pub fn set_ra(&mut self, on: bool) {
        self.set_flag(RA_MASK, on);
    }

    /// Reserved bits; carried through untouched.
    pub fn z(&self) -> u8 {
        self.field(Z_MASK, Z_SHIFT)
    }

    pub fn set_z(&mut self, z: u8) {
        self.set_field(Z_MASK, Z_SHIFT, z);
    }

    pub fn rcode(&self) -> u8 {
        self.field(RCODE_MASK, 0)
    }

    pub fn set_rcode(&mut self, rcode: u8) {
        self.set_field(RCODE_MASK, 0, rcode);
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8(self.rcode())
    }

    pub fn set_response_code(&mut self, code: ResponseCode) {
        self.set_rcode(code.to_u8());
    }

    fn flag(&self, mask: u16) -> bool {
        self.flags & mask != 0
    }

    fn set_flag(&mut self, mask: u16, on: bool) {
        if on {
            self.flags |= mask;
        } else {
            self.flags &= !mask;
        }
    }

    fn field(&self, mask: u16, shift: u16) -> u8 {
        ((self.flags & mask) >> shift) as u8
    }

    fn set_field(&mut self, mask: u16, shift: u16, value: u8) {
        self.flags = (self.flags & !mask) | ((u16::from(value) << shift) & mask);
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={:#06x} qr={} opcode={} aa={} tc={} rd={} ra={} z={} rcode={} qd={} an={} ns={} ar={}",
            self.id,
            u8::from(self.qr()),
            self.opcode(),
            u8::from(self.aa()),
            u8::from(self.tc()),
            u8::from(self.rd()),
            u8::from(self.ra()),
            self.z(),
            self.response_code(),
            self.question_count,
            self.answer_count,
            self.authority_count,
            self.additional_count,
        )
    }
}
