use crate::dns::wire::{format_packet_bits, MessageDecoder, MessageEncoder};
use ferrous_relay_application::use_cases::ResolveMessageUseCase;
use ferrous_relay_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, enabled, trace, Level};

/// Turns one client datagram into the datagram to send back.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<ResolveMessageUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveMessageUseCase>) -> Self {
        Self { use_case }
    }

    /// Decodes the datagram, resolves it and encodes the response.
    ///
    /// An error means no response should be sent for this datagram.
    pub async fn handle_datagram(
        &self,
        datagram: &[u8],
        client: SocketAddr,
    ) -> Result<Vec<u8>, DomainError> {
        if enabled!(Level::TRACE) {
            trace!(client = %client, "Query bytes:\n{}", format_packet_bits(datagram));
        }

        let request = MessageDecoder::decode(datagram)?;
        let header = &request.header;

        debug!(
            client = %client,
            id = header.id,
            qr = header.is_response,
            opcode = header.opcode,
            aa = header.authoritative,
            tc = header.truncated,
            rd = header.recursion_desired,
            ra = header.recursion_available,
            z = header.reserved_z,
            rcode = header.response_code,
            questions = header.question_count,
            answers = header.answer_count,
            authority = header.authority_count,
            additional = header.additional_count,
            "DNS query decoded"
        );

        for question in &request.questions {
            debug!(
                client = %client,
                domain = %question.name,
                record_type = question.record_type,
                record_class = question.record_class,
                "Question"
            );
        }

        let response = self.use_case.execute(&request).await?;
        let bytes = MessageEncoder::encode_response(&response)?;

        debug!(
            client = %client,
            id = response.header.id,
            rcode = response.header.response_code,
            answers = response.answers.len(),
            bytes = bytes.len(),
            "DNS response encoded"
        );

        if enabled!(Level::TRACE) {
            trace!(client = %client, "Response bytes:\n{}", format_packet_bits(&bytes));
        }

        Ok(bytes)
    }

    pub fn is_forwarding(&self) -> bool {
        self.use_case.has_upstream()
    }
}
