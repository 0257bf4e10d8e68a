use ferrous_relay_domain::{DomainError, DomainName};
use rustc_hash::FxHashSet;

/// Longest label a length byte can describe.
pub const MAX_LABEL_LEN: usize = 63;
/// Longest name in wire form, length bytes and terminator included.
pub const MAX_NAME_LEN: usize = 255;
/// Upper bound on compression pointers followed while decoding one name.
pub const MAX_POINTER_HOPS: usize = 32;

const POINTER_TAG: u8 = 0b1100_0000;
const OFFSET_HIGH_MASK: u8 = 0b0011_1111;

/// Encodes a name as length-prefixed labels. The terminating zero byte is
/// not written; the caller appends it after the last label.
pub fn encode_name(name: &DomainName) -> Result<Vec<u8>, DomainError> {
    let mut encoded = Vec::with_capacity(name.labels().iter().map(|l| l.len() + 1).sum());

    for label in name.labels().iter().filter(|label| !label.is_empty()) {
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::MalformedName(format!(
                "label '{}' is {} bytes, limit is {}",
                String::from_utf8_lossy(label),
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        encoded.push(label.len() as u8);
        encoded.extend_from_slice(label);
    }

    if encoded.len() + 1 > MAX_NAME_LEN {
        return Err(DomainError::MalformedName(format!(
            "name '{}' is {} bytes on the wire, limit is {}",
            name,
            encoded.len() + 1,
            MAX_NAME_LEN
        )));
    }

    Ok(encoded)
}

/// Decodes the name starting at `cursor` in `message`.
///
/// Returns the labels and the number of bytes the name occupies at `cursor`.
/// Compression pointers are followed through `message` to any depth; bytes
/// read at a pointer target are not counted, so a name that is just a
/// pointer consumes 2 bytes.
pub fn decode_name(message: &[u8], cursor: usize) -> Result<(DomainName, usize), DomainError> {
    let mut labels = Vec::new();
    let mut pos = cursor;
    let mut consumed: Option<usize> = None;
    let mut visited = FxHashSet::default();
    let mut wire_len = 1;

    loop {
        let length = *message.get(pos).ok_or_else(|| {
            DomainError::MalformedName(format!(
                "length byte at offset {} is past the end of a {}-byte message",
                pos,
                message.len()
            ))
        })?;

        match length & POINTER_TAG {
            POINTER_TAG => {
                let low = *message.get(pos + 1).ok_or_else(|| {
                    DomainError::MalformedName(format!(
                        "compression pointer at offset {} is cut off",
                        pos
                    ))
                })?;
                let target = (((length & OFFSET_HIGH_MASK) as usize) << 8) | low as usize;

                if consumed.is_none() {
                    consumed = Some(pos + 2 - cursor);
                }
                if target >= message.len() {
                    return Err(DomainError::MalformedName(format!(
                        "compression pointer at offset {} targets offset {} outside the {}-byte message",
                        pos,
                        target,
                        message.len()
                    )));
                }
                if visited.len() >= MAX_POINTER_HOPS {
                    return Err(DomainError::MalformedName(format!(
                        "more than {} compression pointers in one name",
                        MAX_POINTER_HOPS
                    )));
                }
                if !visited.insert(target) {
                    return Err(DomainError::MalformedName(format!(
                        "compression pointer loop at offset {}",
                        target
                    )));
                }
                pos = target;
            }
            0 if length == 0 => {
                if consumed.is_none() {
                    consumed = Some(pos + 1 - cursor);
                }
                break;
            }
            0 => {
                let start = pos + 1;
                let end = start + length as usize;
                let label = message.get(start..end).ok_or_else(|| {
                    DomainError::MalformedName(format!(
                        "label at offset {} runs past the end of a {}-byte message",
                        pos,
                        message.len()
                    ))
                })?;

                wire_len += label.len() + 1;
                if wire_len > MAX_NAME_LEN {
                    return Err(DomainError::MalformedName(format!(
                        "name exceeds {} bytes",
                        MAX_NAME_LEN
                    )));
                }

                labels.push(label.to_vec());
                pos = end;
            }
            reserved => {
                return Err(DomainError::MalformedName(format!(
                    "reserved label type {:#04x} at offset {}",
                    reserved, pos
                )));
            }
        }
    }

    Ok((DomainName::from_labels(labels), consumed.unwrap_or_default()))
}
