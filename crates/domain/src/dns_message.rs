//! Whole-message assembly: header, question section, answer section.
//!
//! Counts in the header drive decoding. Encoding writes the header exactly
//! as given; keeping QDCOUNT/ANCOUNT in step with the lists is the caller's
//! job (see [`Message::sync_counts`]). Authority and additional records are
//! neither parsed nor emitted.

use crate::dns_header::{Header, HEADER_LEN};
use crate::dns_question::Question;
use crate::dns_record::ResourceRecord;
use crate::DomainError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
}

impl Message {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    pub fn decode(buf: &[u8]) -> Result<Self, DomainError> {
        let header = Header::decode(buf)?;
        let mut pos = HEADER_LEN;

        let mut questions = Vec::new();
        for _ in 0..header.question_count {
            let (question, next) = Question::decode(buf, pos)?;
            questions.push(question);
            pos = next;
        }

        let mut answers = Vec::new();
        for _ in 0..header.answer_count {
            let (record, next) = ResourceRecord::decode(buf, pos)?;
            answers.push(record);
            pos = next;
        }

        Ok(Self {
            header,
            questions,
            answers,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = Vec::with_capacity(512);
        out.extend_from_slice(&self.header.encode());
        for question in &self.questions {
            question.encode_into(&mut out)?;
        }
        for answer in &self.answers {
            answer.encode_into(&mut out)?;
        }
        Ok(out)
    }

    /// Sets QDCOUNT/ANCOUNT from the lists and zeroes the sections this
    /// message does not carry.
    pub fn sync_counts(&mut self) {
        self.header.question_count = saturating_count(self.questions.len());
        self.header.answer_count = saturating_count(self.answers.len());
        self.header.authority_count = 0;
        self.header.additional_count = 0;
    }
}

fn saturating_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; header: {}", self.header)?;
        writeln!(f, ";; question section:")?;
        for question in &self.questions {
            writeln!(f, "{}", question)?;
        }
        writeln!(f, ";; answer section:")?;
        for answer in &self.answers {
            writeln!(f, "{}", answer)?;
        }
        Ok(())
    }
}
