pub mod forwarder;

pub use forwarder::{validate_response_id, DnsForwarder};
