use ferrous_split_domain::{ForwarderConfig, UpstreamAddress};
use std::io::Write;
use std::net::SocketAddr;
use tempfile::NamedTempFile;

pub const FLAG_RD: u16 = 0x0100;

/// Standard query with one A/IN question for `name`.
pub fn build_query(id: u16, name: &str) -> Vec<u8> {
    build_query_with_flags(id, FLAG_RD, name)
}

pub fn build_query_with_flags(id: u16, flags: u16, name: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&flags.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    buf
}

/// Query whose QNAME is written label by label from raw octets, so labels may
/// carry dots or bytes outside ASCII.
pub fn build_query_from_labels(id: u16, labels: &[&[u8]]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(64);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&FLAG_RD.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in labels {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label);
    }
    buf.push(0);
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    buf
}

/// Header-only query: QDCOUNT = 0.
pub fn build_questionless_query(id: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(12);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&FLAG_RD.to_be_bytes());
    buf.extend_from_slice(&[0x00; 8]);
    buf
}

pub fn reply_id(reply: &[u8]) -> u16 {
    u16::from_be_bytes([reply[0], reply[1]])
}

pub fn reply_rcode(reply: &[u8]) -> u8 {
    reply[3] & 0x0F
}

/// IPv4 address in the first answer record of a mock reply.
pub fn answer_ip(reply: &[u8]) -> [u8; 4] {
    let tail = &reply[reply.len() - 4..];
    [tail[0], tail[1], tail[2], tail[3]]
}

pub fn forwarder(primary: SocketAddr, secondary: SocketAddr) -> ForwarderConfig {
    ForwarderConfig::new(
        UpstreamAddress::from(primary),
        vec![UpstreamAddress::from(secondary)],
    )
    .unwrap()
}

pub fn domain_list_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
