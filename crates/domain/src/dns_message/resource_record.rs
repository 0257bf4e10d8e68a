use super::{DomainName, CLASS_IN, TYPE_A};
use std::net::Ipv4Addr;

/// An answer record. Only the IPv4 record shape is modeled, so record data
/// is always a 4-byte address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub record_type: u16,
    pub record_class: u16,
    pub ttl: u32,
    pub data_length: u16,
    pub address: Ipv4Addr,
}

impl ResourceRecord {
    pub fn a(name: impl Into<DomainName>, ttl: u32, address: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            record_type: TYPE_A,
            record_class: CLASS_IN,
            ttl,
            data_length: 4,
            address,
        }
    }
}
