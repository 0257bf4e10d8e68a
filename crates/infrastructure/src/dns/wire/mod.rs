//! DNS wire format (RFC 1035 §4.1): header, question and answer sections.
//!
//! Names are always written fully expanded; compression pointers are only
//! ever read.

mod decoder;
mod dump;
mod encoder;
mod name;
mod reader;

pub use decoder::MessageDecoder;
pub use dump::format_packet_bits;
pub use encoder::MessageEncoder;
pub use name::{decode_name, encode_name, MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_HOPS};

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;
