use super::{DomainName, CLASS_IN, TYPE_A};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DomainName,
    pub record_type: u16,
    pub record_class: u16,
}

impl Question {
    pub fn new(name: impl Into<DomainName>, record_type: u16, record_class: u16) -> Self {
        Self {
            name: name.into(),
            record_type,
            record_class,
        }
    }

    /// An IPv4 address question in the Internet class.
    pub fn a(name: impl Into<DomainName>) -> Self {
        Self::new(name, TYPE_A, CLASS_IN)
    }
}
