#![allow(dead_code)]

use async_trait::async_trait;
use dns_relay_application::ports::QueryForwarder;
use dns_relay_domain::{DomainError, Message, ResourceRecord};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum MockReply {
    Answers(Vec<ResourceRecord>),
    Error(DomainError),
}

/// Forwarder double keyed by question name. Unknown names get an empty
/// NOERROR reply. Every forwarded request is recorded.
#[derive(Clone, Default)]
pub struct MockQueryForwarder {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<Message>>>,
}

impl MockQueryForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_a_record(&self, name: &str, ttl: u32, address: Ipv4Addr) {
        let record = ResourceRecord::a(name.parse().unwrap(), ttl, address);
        self.replies
            .lock()
            .unwrap()
            .insert(name.to_string(), MockReply::Answers(vec![record]));
    }

    pub fn set_answers(&self, name: &str, answers: Vec<ResourceRecord>) {
        self.replies
            .lock()
            .unwrap()
            .insert(name.to_string(), MockReply::Answers(answers));
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.replies
            .lock()
            .unwrap()
            .insert(name.to_string(), MockReply::Error(error));
    }

    pub fn calls(&self) -> Vec<Message> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryForwarder for MockQueryForwarder {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        self.calls.lock().unwrap().push(request.clone());

        let name = request.questions[0].name.to_string();
        let reply = self.replies.lock().unwrap().get(&name).cloned();

        let mut response = request.clone();
        response.header.set_qr(true);
        match reply {
            Some(MockReply::Error(e)) => return Err(e),
            Some(MockReply::Answers(answers)) => response.answers = answers,
            None => {}
        }
        response.sync_counts();
        Ok(response)
    }
}
