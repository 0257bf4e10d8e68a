use super::name::decode_name;
use super::reader::WireReader;
use super::HEADER_LEN;
use ferrous_relay_domain::{DomainError, DomainName, Header, Message, Question, ResourceRecord};
use std::net::Ipv4Addr;
use tracing::debug;

const QR_BIT: u8 = 0b1000_0000;
const OPCODE_MASK: u8 = 0b0111_1000;
const AA_BIT: u8 = 0b0000_0100;
const TC_BIT: u8 = 0b0000_0010;
const RD_BIT: u8 = 0b0000_0001;
const RA_BIT: u8 = 0b1000_0000;
const Z_MASK: u8 = 0b0111_0000;
const RCODE_MASK: u8 = 0b0000_1111;

/// Parses a datagram into a [`Message`].
pub struct MessageDecoder;

impl MessageDecoder {
    /// Decodes the header, `question_count` questions and `answer_count`
    /// answers. Answers whose record data is not a 4-byte address are
    /// skipped. Anything after the answer section is ignored.
    pub fn decode(datagram: &[u8]) -> Result<Message, DomainError> {
        let mut reader = WireReader::new(datagram);
        let header = Self::decode_header(&mut reader)?;

        let mut questions = Vec::with_capacity(header.question_count as usize);
        for _ in 0..header.question_count {
            questions.push(Self::decode_question(&mut reader)?);
        }

        let mut answers = Vec::with_capacity(header.answer_count as usize);
        for _ in 0..header.answer_count {
            if let Some(answer) = Self::decode_answer(&mut reader)? {
                answers.push(answer);
            }
        }

        Ok(Message {
            header,
            questions,
            answers,
        })
    }

    fn decode_header(reader: &mut WireReader<'_>) -> Result<Header, DomainError> {
        let fixed = reader.take(HEADER_LEN)?;
        let flags = fixed[2];
        let codes = fixed[3];
        let count = |at: usize| u16::from_be_bytes([fixed[at], fixed[at + 1]]);

        Ok(Header {
            id: count(0),
            is_response: flags & QR_BIT != 0,
            opcode: (flags & OPCODE_MASK) >> 3,
            authoritative: flags & AA_BIT != 0,
            truncated: flags & TC_BIT != 0,
            recursion_desired: flags & RD_BIT != 0,
            recursion_available: codes & RA_BIT != 0,
            reserved_z: (codes & Z_MASK) >> 4,
            response_code: codes & RCODE_MASK,
            question_count: count(4),
            answer_count: count(6),
            authority_count: count(8),
            additional_count: count(10),
        })
    }

    fn read_name(reader: &mut WireReader<'_>) -> Result<DomainName, DomainError> {
        let (name, consumed) = decode_name(reader.buffer(), reader.position())?;
        reader.advance(consumed);
        Ok(name)
    }

    fn decode_question(reader: &mut WireReader<'_>) -> Result<Question, DomainError> {
        let name = Self::read_name(reader)?;
        let record_type = reader.read_u16()?;
        let record_class = reader.read_u16()?;

        Ok(Question {
            name,
            record_type,
            record_class,
        })
    }

    fn decode_answer(reader: &mut WireReader<'_>) -> Result<Option<ResourceRecord>, DomainError> {
        let name = Self::read_name(reader)?;
        let record_type = reader.read_u16()?;
        let record_class = reader.read_u16()?;
        let ttl = reader.read_u32()?;
        let data_length = reader.read_u16()?;
        let data = reader.take(data_length as usize)?;

        let Ok(octets) = <[u8; 4]>::try_from(data) else {
            debug!(
                name = %name,
                record_type,
                data_length,
                "Skipping answer without IPv4 record data"
            );
            return Ok(None);
        };

        Ok(Some(ResourceRecord {
            name,
            record_type,
            record_class,
            ttl,
            data_length,
            address: Ipv4Addr::from(octets),
        }))
    }
}
