use std::fmt::Write;

/// Renders every byte of a datagram as `byte #N: bbbbbbbb`, one per line.
pub fn format_packet_bits(datagram: &[u8]) -> String {
    let mut out = String::with_capacity(datagram.len() * 20);
    for (index, byte) in datagram.iter().enumerate() {
        let _ = writeln!(out, "byte #{}: {:08b}", index, byte);
    }
    out
}
