use std::fmt;

/// A domain name held as its labels, in the order they appear on the wire
/// (`www`, `example`, `com`). The root name has no labels.
///
/// Labels are raw octets and need not be UTF-8; only `Display` interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DomainName {
    labels: Vec<Vec<u8>>,
}

impl DomainName {
    pub fn from_labels(labels: Vec<Vec<u8>>) -> Self {
        Self { labels }
    }

    /// Splits a dotted name into labels. Empty labels, including the one
    /// produced by a trailing dot, are dropped.
    pub fn parse(dotted: &str) -> Self {
        Self {
            labels: dotted
                .split('.')
                .filter(|label| !label.is_empty())
                .map(|label| label.as_bytes().to_vec())
                .collect(),
        }
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for (index, label) in self.labels.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(&String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

impl From<&str> for DomainName {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}
