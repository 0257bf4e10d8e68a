mod domain_name;
mod header;
mod message;
mod question;
mod resource_record;

pub use domain_name::DomainName;
pub use header::{Header, OPCODE_QUERY, RCODE_NOT_IMPLEMENTED, RCODE_NO_ERROR};
pub use message::Message;
pub use question::Question;
pub use resource_record::ResourceRecord;

/// Record type of an IPv4 address record.
pub const TYPE_A: u16 = 1;
/// The Internet class.
pub const CLASS_IN: u16 = 1;
