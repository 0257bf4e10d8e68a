pub mod dns_server_mock;

pub use dns_server_mock::{MockBehavior, MockDnsServer};

/// Raw bytes of a standard query for `domains`, built by hand so the
/// encoder is not involved.
#[allow(dead_code)]
pub fn raw_query(id: u16, domains: &[&str]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&id.to_be_bytes());
    bytes.extend_from_slice(&[0x01, 0x00]);
    bytes.extend_from_slice(&(domains.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    for domain in domains {
        for label in domain.split('.') {
            bytes.push(label.len() as u8);
            bytes.extend_from_slice(label.as_bytes());
        }
        bytes.push(0);
        bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    }

    bytes
}
