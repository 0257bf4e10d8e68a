//! Ferrous Relay Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_protocol;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, DnsConfig, LoggingConfig, ServerConfig};
pub use dns_message::{
    DomainName, Header, Message, Question, ResourceRecord, CLASS_IN, OPCODE_QUERY,
    RCODE_NOT_IMPLEMENTED, RCODE_NO_ERROR, TYPE_A,
};
pub use dns_protocol::UpstreamAddr;
pub use errors::DomainError;
