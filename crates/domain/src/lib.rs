//! dns-relay domain layer: wire types, codecs and configuration.
pub mod config;
pub mod dns_header;
pub mod dns_message;
pub mod dns_name;
pub mod dns_question;
pub mod dns_record;
pub mod errors;
mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_header::{Header, ResponseCode, HEADER_LEN, OPCODE_QUERY};
pub use dns_message::Message;
pub use dns_name::DomainName;
pub use dns_question::Question;
pub use dns_record::{RecordClass, RecordType, ResourceRecord};
pub use errors::DomainError;
