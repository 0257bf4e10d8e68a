use super::name::encode_name;
use super::HEADER_LEN;
use ferrous_relay_domain::{DomainError, DomainName, Header, Message, CLASS_IN, TYPE_A};

/// Serializes a [`Message`] into exactly as many bytes as its content needs.
///
/// Question and answer counts are taken from the section lengths, authority
/// and additional counts are copied from the header as-is. Questions are
/// always written as A/IN and names are never compressed.
pub struct MessageEncoder;

impl MessageEncoder {
    /// Query form: header flags come from the model, the reserved Z bits are zero.
    pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
        Self::encode_with_header(message, message.header)
    }

    /// Response form: the response bit is set and the authoritative and
    /// truncated bits are cleared, whatever the model says.
    pub fn encode_response(message: &Message) -> Result<Vec<u8>, DomainError> {
        let header = Header {
            is_response: true,
            authoritative: false,
            truncated: false,
            ..message.header
        };
        Self::encode_with_header(message, header)
    }

    fn encode_with_header(message: &Message, header: Header) -> Result<Vec<u8>, DomainError> {
        let sections = message.questions.len() + message.answers.len();
        let mut buf = Vec::with_capacity(HEADER_LEN + 32 * sections);

        Self::write_header(&mut buf, &header, message)?;

        for question in &message.questions {
            Self::write_name(&mut buf, &question.name)?;
            buf.extend_from_slice(&TYPE_A.to_be_bytes());
            buf.extend_from_slice(&CLASS_IN.to_be_bytes());
        }

        for answer in &message.answers {
            Self::write_name(&mut buf, &answer.name)?;
            buf.extend_from_slice(&answer.record_type.to_be_bytes());
            buf.extend_from_slice(&answer.record_class.to_be_bytes());
            buf.extend_from_slice(&answer.ttl.to_be_bytes());
            buf.extend_from_slice(&answer.data_length.to_be_bytes());
            buf.extend_from_slice(&answer.address.octets());
        }

        Ok(buf)
    }

    fn write_header(
        buf: &mut Vec<u8>,
        header: &Header,
        message: &Message,
    ) -> Result<(), DomainError> {
        let question_count = Self::section_count("question", message.questions.len())?;
        let answer_count = Self::section_count("answer", message.answers.len())?;

        let flags = (header.is_response as u8) << 7
            | (header.opcode & 0x0F) << 3
            | (header.authoritative as u8) << 2
            | (header.truncated as u8) << 1
            | header.recursion_desired as u8;
        let codes = (header.recursion_available as u8) << 7 | (header.response_code & 0x0F);

        buf.extend_from_slice(&header.id.to_be_bytes());
        buf.push(flags);
        buf.push(codes);
        buf.extend_from_slice(&question_count.to_be_bytes());
        buf.extend_from_slice(&answer_count.to_be_bytes());
        buf.extend_from_slice(&header.authority_count.to_be_bytes());
        buf.extend_from_slice(&header.additional_count.to_be_bytes());
        Ok(())
    }

    fn section_count(section: &'static str, count: usize) -> Result<u16, DomainError> {
        u16::try_from(count).map_err(|_| DomainError::SectionTooLarge { section, count })
    }

    fn write_name(buf: &mut Vec<u8>, name: &DomainName) -> Result<(), DomainError> {
        buf.extend_from_slice(&encode_name(name)?);
        buf.push(0);
        Ok(())
    }
}
