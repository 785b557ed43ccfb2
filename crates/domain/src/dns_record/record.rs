use super::{RecordClass, RecordType};
use crate::dns_name::DomainName;
use crate::dns_question::Question;
use crate::wire;
use crate::DomainError;
use std::fmt;
use std::net::Ipv4Addr;

/// One answer-section record. RDATA is opaque; RDLENGTH is never stored and
/// is always derived from `data.len()` when encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,

    pub record_type: RecordType,

    pub record_class: RecordClass,

    pub ttl: u32,

    pub data: Vec<u8>,
}

impl ResourceRecord {
    pub fn new(
        name: DomainName,
        record_type: RecordType,
        record_class: RecordClass,
        ttl: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name,
            record_type,
            record_class,
            ttl,
            data,
        }
    }

    /// Starts a record answering `question`. TTL and data are left empty
    /// for the caller to fill in before encoding.
    pub fn answering(question: &Question) -> Self {
        Self::new(
            question.name.clone(),
            question.record_type,
            question.record_class,
            0,
            Vec::new(),
        )
    }

    pub fn a(name: DomainName, ttl: u32, address: Ipv4Addr) -> Self {
        Self::new(
            name,
            RecordType::A,
            RecordClass::IN,
            ttl,
            address.octets().to_vec(),
        )
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.record_type != RecordType::A {
            return None;
        }
        let octets: [u8; 4] = self.data.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }

    pub fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize), DomainError> {
        let (name, pos) = DomainName::decode(buf, offset)?;
        let record_type = RecordType::from_u16(wire::read_u16(buf, pos)?);
        let record_class = RecordClass::from_u16(wire::read_u16(buf, pos + 2)?);
        let ttl = wire::read_u32(buf, pos + 4)?;
        let rdlength = usize::from(wire::read_u16(buf, pos + 8)?);
        let data = wire::slice(buf, pos + 10, rdlength)?.to_vec();

        Ok((
            Self {
                name,
                record_type,
                record_class,
                ttl,
                data,
            },
            pos + 10 + rdlength,
        ))
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), DomainError> {
        let rdlength = u16::try_from(self.data.len()).map_err(|_| {
            DomainError::InvalidRecordData(format!(
                "{} bytes of RDATA exceeds the 65535 byte limit",
                self.data.len()
            ))
        })?;

        self.name.encode_into(out)?;
        out.extend_from_slice(&self.record_type.to_u16().to_be_bytes());
        out.extend_from_slice(&self.record_class.to_u16().to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());
        out.extend_from_slice(&rdlength.to_be_bytes());
        out.extend_from_slice(&self.data);
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = Vec::with_capacity(self.name.wire_len() + 10 + self.data.len());
        self.encode_into(&mut out)?;
        Ok(out)
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ",
            self.name, self.ttl, self.record_class, self.record_type
        )?;
        match self.ipv4() {
            Some(address) => write!(f, "{}", address),
            None => {
                for byte in &self.data {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResourceRecord {
        ResourceRecord::a("codecrafters.io".parse().unwrap(), 60, Ipv4Addr::new(8, 8, 8, 8))
    }

    #[test]
    fn test_encode_layout() {
        let bytes = sample().encode().unwrap();
        let mut expected = b"\x0ccodecrafters\x02io\x00".to_vec();
        expected.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0, 60, 0, 4, 8, 8, 8, 8]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_roundtrip() {
        let record = sample();
        let bytes = record.encode().unwrap();
        let (decoded, next) = ResourceRecord::decode(&bytes, 0).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(next, bytes.len());
    }

    #[test]
    fn test_rdlength_follows_data() {
        let mut record = sample();
        record.data = vec![1, 2, 3];
        let bytes = record.encode().unwrap();
        let rdlength_at = bytes.len() - 3 - 2;
        assert_eq!(&bytes[rdlength_at..rdlength_at + 2], &[0, 3]);
    }

    #[test]
    fn test_rdlength_past_end_is_truncated() {
        let mut bytes = sample().encode().unwrap();
        bytes.truncate(bytes.len() - 1);
        let result = ResourceRecord::decode(&bytes, 0);
        assert!(matches!(result, Err(DomainError::TruncatedInput { .. })));
    }

    #[test]
    fn test_oversized_rdata_is_rejected() {
        let mut record = sample();
        record.data = vec![0; usize::from(u16::MAX) + 1];
        assert!(matches!(
            record.encode(),
            Err(DomainError::InvalidRecordData(_))
        ));
    }

    #[test]
    fn test_answering_copies_question() {
        let question = Question::new(
            "example.com".parse().unwrap(),
            RecordType::MX,
            RecordClass::CH,
        );
        let record = ResourceRecord::answering(&question);
        assert_eq!(record.name, question.name);
        assert_eq!(record.record_type, RecordType::MX);
        assert_eq!(record.record_class, RecordClass::CH);
        assert_eq!(record.ttl, 0);
        assert!(record.data.is_empty());
    }

    #[test]
    fn test_ipv4_accessor() {
        assert_eq!(sample().ipv4(), Some(Ipv4Addr::new(8, 8, 8, 8)));

        let mut record = sample();
        record.data.push(0);
        assert_eq!(record.ipv4(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "codecrafters.io 60 IN A 8.8.8.8");
    }
}
