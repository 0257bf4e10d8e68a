use crate::ports::UpstreamExchange;
use ferrous_relay_domain::{
    DomainError, Header, Message, Question, ResourceRecord, RCODE_NOT_IMPLEMENTED,
    RCODE_NO_ERROR,
};
use futures::future::try_join_all;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

/// TTL of the synthesized answer used when no upstream is configured.
pub const STUB_TTL: u32 = 60;
/// Address of the synthesized answer used when no upstream is configured.
pub const STUB_ADDRESS: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

/// Turns a decoded request into the response message for it.
///
/// Without an upstream every question gets a stub A record. With one, each
/// question is sent upstream as its own single-question query and all the
/// answers of every reply are concatenated in question order. Any upstream
/// failure fails the whole response.
pub struct ResolveMessageUseCase {
    upstream: Option<Arc<dyn UpstreamExchange>>,
    concurrent: bool,
}

impl ResolveMessageUseCase {
    pub fn new(upstream: Option<Arc<dyn UpstreamExchange>>) -> Self {
        Self {
            upstream,
            concurrent: false,
        }
    }

    /// Forward the questions of one request concurrently. Answers are still
    /// assembled in question order.
    pub fn with_concurrent_subqueries(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    pub fn has_upstream(&self) -> bool {
        self.upstream.is_some()
    }

    pub async fn execute(&self, request: &Message) -> Result<Message, DomainError> {
        let answers = match &self.upstream {
            None => Self::stub_answers(&request.questions),
            Some(upstream) if self.concurrent => {
                Self::forward_concurrently(upstream.as_ref(), request).await?
            }
            Some(upstream) => Self::forward_sequentially(upstream.as_ref(), request).await?,
        };

        Self::build_response(request, answers)
    }

    fn stub_answers(questions: &[Question]) -> Vec<ResourceRecord> {
        questions
            .iter()
            .map(|question| ResourceRecord::a(question.name.clone(), STUB_TTL, STUB_ADDRESS))
            .collect()
    }

    async fn forward_sequentially(
        upstream: &dyn UpstreamExchange,
        request: &Message,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut answers = Vec::new();

        for (index, question) in request.questions.iter().enumerate() {
            debug!(
                index,
                question = %question.name,
                upstream = %upstream.server(),
                "Forwarding question"
            );
            let reply = upstream.exchange(&request.single_question(question)).await?;
            answers.extend(reply.answers);
        }

        Ok(answers)
    }

    async fn forward_concurrently(
        upstream: &dyn UpstreamExchange,
        request: &Message,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        debug!(
            questions = request.questions.len(),
            upstream = %upstream.server(),
            "Forwarding questions concurrently"
        );

        let sub_queries: Vec<Message> = request
            .questions
            .iter()
            .map(|question| request.single_question(question))
            .collect();

        let replies =
            try_join_all(sub_queries.iter().map(|query| upstream.exchange(query))).await?;

        Ok(replies.into_iter().flat_map(|reply| reply.answers).collect())
    }

    fn build_response(
        request: &Message,
        answers: Vec<ResourceRecord>,
    ) -> Result<Message, DomainError> {
        let question_count = section_count("question", request.questions.len())?;
        let answer_count = section_count("answer", answers.len())?;

        let response_code = if request.header.is_standard_query() {
            RCODE_NO_ERROR
        } else {
            RCODE_NOT_IMPLEMENTED
        };

        let header = Header {
            id: request.header.id,
            is_response: true,
            opcode: request.header.opcode,
            authoritative: false,
            truncated: false,
            recursion_desired: request.header.recursion_desired,
            recursion_available: request.header.recursion_desired,
            reserved_z: 0,
            response_code,
            question_count,
            answer_count,
            authority_count: request.header.authority_count,
            additional_count: request.header.additional_count,
        };

        Ok(Message {
            header,
            questions: request.questions.clone(),
            answers,
        })
    }
}

fn section_count(section: &'static str, count: usize) -> Result<u16, DomainError> {
    u16::try_from(count).map_err(|_| DomainError::SectionTooLarge { section, count })
}
