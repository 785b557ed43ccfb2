use crate::dns_name::DomainName;
use crate::dns_record::{RecordClass, RecordType};
use crate::wire;
use crate::DomainError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub name: DomainName,
    pub record_type: RecordType,
    pub record_class: RecordClass,
}

impl Question {
    pub fn new(name: DomainName, record_type: RecordType, record_class: RecordClass) -> Self {
        Self {
            name,
            record_type,
            record_class,
        }
    }

    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, pos) = DomainName::decode(buf, offset)?;
        let record_type = RecordType::from_u16(wire::read_u16(buf, pos)?);
        let record_class = RecordClass::from_u16(wire::read_u16(buf, pos + 2)?);
        Ok((Self::new(name, record_type, record_class), pos + 4))
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        self.name.encode_into(out)?;
        out.extend_from_slice(&self.record_type.to_u16().to_be_bytes());
        out.extend_from_slice(&self.record_class.to_u16().to_be_bytes());
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = Vec::with_capacity(self.name.wire_len() + 4);
        self.encode_into(&mut out)?;
        Ok(out)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.record_class, self.record_type)
    }
}
