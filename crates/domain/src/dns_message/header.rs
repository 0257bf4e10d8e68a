/// Standard query opcode; every other opcode is answered as not implemented.
pub const OPCODE_QUERY: u8 = 0;
pub const RCODE_NO_ERROR: u8 = 0;
pub const RCODE_NOT_IMPLEMENTED: u8 = 4;

/// The fixed 12-byte DNS header, unpacked into its individual fields.
///
/// `opcode` and `response_code` hold 4-bit values and `reserved_z` a 3-bit
/// value. The encoder masks the first two to width and always writes Z as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub is_response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub reserved_z: u8,
    pub response_code: u8,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl Header {
    /// A standard query header with the recursion-desired bit set.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            recursion_desired: true,
            ..Self::default()
        }
    }

    pub fn is_standard_query(&self) -> bool {
        self.opcode == OPCODE_QUERY
    }
}
