#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_relay_application::ports::UpstreamExchange;
use ferrous_relay_domain::{DomainError, Message, ResourceRecord};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Upstream double that answers per question name and records every query it sees.
pub struct MockUpstream {
    answers: Mutex<HashMap<String, Vec<ResourceRecord>>>,
    errors: Mutex<HashMap<String, DomainError>>,
    received: Mutex<Vec<Message>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            errors: Mutex::new(HashMap::new()),
            received: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn set_answers(&self, domain: &str, addresses: &[Ipv4Addr]) {
        let records = addresses
            .iter()
            .map(|addr| ResourceRecord::a(domain, 300, *addr))
            .collect();
        self.answers
            .lock()
            .unwrap()
            .insert(domain.to_string(), records);
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.errors
            .lock()
            .unwrap()
            .insert(domain.to_string(), error);
    }

    pub fn received(&self) -> Vec<Message> {
        self.received.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstream {
    async fn exchange(&self, query: &Message) -> Result<Message, DomainError> {
        self.received.lock().unwrap().push(query.clone());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let domain = query.questions[0].name.to_string();

        if let Some(err) = self.errors.lock().unwrap().get(&domain).cloned() {
            return Err(err);
        }

        let answers = self
            .answers
            .lock()
            .unwrap()
            .get(&domain)
            .cloned()
            .unwrap_or_default();

        let mut reply = query.clone();
        reply.header.is_response = true;
        reply.header.answer_count = answers.len() as u16;
        reply.answers = answers;
        Ok(reply)
    }

    fn server(&self) -> String {
        "mock-upstream:53".to_string()
    }
}
