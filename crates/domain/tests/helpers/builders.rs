#![allow(dead_code)]
use dns_relay_domain::{Header, Message, Question, RecordClass, RecordType, ResourceRecord};
use std::net::Ipv4Addr;

pub struct MessageBuilder {
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
}

impl MessageBuilder {
    pub fn query(id: u16) -> Self {
        let mut header = Header::new(id);
        header.set_rd(true);
        Self {
            header,
            questions: Vec::new(),
            answers: Vec::new(),
        }
    }

    pub fn opcode(mut self, opcode: u8) -> Self {
        self.header.set_opcode(opcode);
        self
    }

    pub fn question(mut self, name: &str) -> Self {
        self.questions.push(Question::new(
            name.parse().unwrap(),
            RecordType::A,
            RecordClass::IN,
        ));
        self
    }

    pub fn answer(mut self, name: &str, ttl: u32, address: [u8; 4]) -> Self {
        self.answers.push(ResourceRecord::a(
            name.parse().unwrap(),
            ttl,
            Ipv4Addr::from(address),
        ));
        self
    }

    pub fn build(self) -> Message {
        let mut message = Message {
            header: self.header,
            questions: self.questions,
            answers: self.answers,
        };
        message.sync_counts();
        message
    }
}
