use crate::ports::QueryForwarder;
use dns_relay_domain::{
    Header, Message, Question, ResourceRecord, ResponseCode, OPCODE_QUERY,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Answers one client message by relaying each question upstream in turn.
///
/// Questions are forwarded serially, one round trip each. A question whose
/// round trip fails contributes no answers; the response is still sent.
pub struct HandleDnsQueryUseCase {
    forwarder: Arc<dyn QueryForwarder>,
    randomize_query_id: bool,
}

impl HandleDnsQueryUseCase {
    pub fn new(forwarder: Arc<dyn QueryForwarder>) -> Self {
        Self {
            forwarder,
            randomize_query_id: false,
        }
    }

    pub fn with_random_query_ids(mut self, enabled: bool) -> Self {
        self.randomize_query_id = enabled;
        self
    }

    pub async fn execute(&self, request: &Message) -> Message {
        let start = Instant::now();
        let opcode = request.header.opcode();
        let mut answers = Vec::new();

        if opcode == OPCODE_QUERY {
            for question in &request.questions {
                let forward_request = self.build_forward_request(request, question);

                match self.forwarder.forward(&forward_request).await {
                    Ok(reply) => {
                        debug!(
                            question = %question,
                            answers = reply.answers.len(),
                            rcode = %reply.header.response_code(),
                            "Upstream reply received"
                        );
                        answers.extend(reply.answers);
                    }
                    Err(e) => {
                        warn!(
                            question = %question,
                            error = %e,
                            transport = e.is_transport_error(),
                            "Failed to forward question"
                        );
                    }
                }
            }
        } else {
            debug!(opcode, id = request.header.id, "Opcode not implemented, skipping upstream");
        }

        let response = Self::build_response(request, answers);

        debug!(
            id = response.header.id,
            questions = response.questions.len(),
            answers = response.answers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query handled"
        );

        response
    }

    /// One-question request for the upstream: the client's header with
    /// QDCOUNT forced to 1 and the other counts cleared.
    pub fn build_forward_request(&self, request: &Message, question: &Question) -> Message {
        let mut header = request.header;
        if self.randomize_query_id {
            header.id = fastrand::u16(..);
        }

        let mut forward_request = Message {
            header,
            questions: vec![question.clone()],
            answers: Vec::new(),
        };
        forward_request.sync_counts();
        forward_request
    }

    pub fn build_response(request: &Message, answers: Vec<ResourceRecord>) -> Message {
        let opcode = request.header.opcode();

        let mut header = Header::new(request.header.id);
        header.set_qr(true);
        header.set_opcode(opcode);
        header.set_rd(request.header.rd());
        header.set_response_code(if opcode == OPCODE_QUERY {
            ResponseCode::NoError
        } else {
            ResponseCode::NotImp
        });

        let mut response = Message {
            header,
            questions: request.questions.clone(),
            answers,
        };
        response.sync_counts();
        response
    }
}
