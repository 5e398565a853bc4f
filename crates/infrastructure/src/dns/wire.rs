//! Minimal wire-format helpers for the forwarding path.
//!
//! The request is never re-encoded: we only read enough of it to route, and
//! synthesize a SERVFAIL directly in wire format when no upstream reply is
//! available.

use ferrous_split_domain::DomainError;
use hickory_proto::op::Message;

pub const HEADER_LEN: usize = 12;

const MAX_NAME_WIRE_LEN: usize = 255;
const FLAG_QR: u16 = 0x8000;
const FLAG_RD: u16 = 0x0100;
const OPCODE_MASK: u16 = 0x7800;
const RCODE_MASK: u16 = 0x000F;
const RCODE_SERVFAIL: u8 = 0x02;

/// Fixed 12-byte DNS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
}

impl Header {
    pub fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }

    pub fn opcode(&self) -> u8 {
        ((self.flags & OPCODE_MASK) >> 11) as u8
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RD != 0
    }

    pub fn rcode(&self) -> u16 {
        self.flags & RCODE_MASK
    }
}

/// First question of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// QNAME in presentation format with a trailing dot, case preserved.
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
    /// Offset one past the first question in the original buffer.
    pub end: usize,
}

pub fn read_header(buf: &[u8]) -> Option<Header> {
    if buf.len() < HEADER_LEN {
        return None;
    }
    Some(Header {
        id: u16::from_be_bytes([buf[0], buf[1]]),
        flags: u16::from_be_bytes([buf[2], buf[3]]),
        qdcount: u16::from_be_bytes([buf[4], buf[5]]),
    })
}

/// Decodes the first question. Compression pointers are not expected in a
/// question name and are rejected.
pub fn parse_question(buf: &[u8]) -> Result<Question, DomainError> {
    let header = read_header(buf)
        .ok_or_else(|| DomainError::MalformedRequest("message shorter than header".into()))?;

    if header.qdcount == 0 {
        return Err(DomainError::MalformedRequest("no question".into()));
    }

    let mut pos = HEADER_LEN;
    let mut name = String::with_capacity(64);
    let mut wire_len = 1;

    loop {
        let label_len = *buf
            .get(pos)
            .ok_or_else(|| DomainError::MalformedRequest("truncated question name".into()))?
            as usize;
        pos += 1;

        if label_len == 0 {
            break;
        }
        if label_len & 0xC0 != 0 {
            return Err(DomainError::MalformedRequest(
                "compressed or extended label in question".into(),
            ));
        }

        let label = buf
            .get(pos..pos + label_len)
            .ok_or_else(|| DomainError::MalformedRequest("truncated label".into()))?;

        wire_len += label_len + 1;
        if wire_len > MAX_NAME_WIRE_LEN {
            return Err(DomainError::MalformedRequest("name too long".into()));
        }
        push_label(&mut name, label);
        name.push('.');
        pos += label_len;
    }

    if name.is_empty() {
        name.push('.');
    }

    let fixed = buf
        .get(pos..pos + 4)
        .ok_or_else(|| DomainError::MalformedRequest("truncated question".into()))?;
    let qtype = u16::from_be_bytes([fixed[0], fixed[1]]);
    let qclass = u16::from_be_bytes([fixed[2], fixed[3]]);

    Ok(Question {
        name,
        qtype,
        qclass,
        end: pos + 4,
    })
}

/// Appends one label in presentation format. Dots and other special
/// characters inside a label are backslash-escaped and bytes outside
/// printable ASCII become `\DDD`, so distinct wire names never collide.
fn push_label(name: &mut String, label: &[u8]) {
    for &b in label {
        match b {
            b'.' | b'\\' | b' ' | b'\'' | b'@' | b';' | b'(' | b')' | b'"' => {
                name.push('\\');
                name.push(b as char);
            }
            0x21..=0x7E => name.push(b as char),
            _ => {
                name.push('\\');
                name.push(char::from(b'0' + b / 100));
                name.push(char::from(b'0' + (b / 10) % 10));
                name.push(char::from(b'0' + b % 10));
            }
        }
    }
}

/// Builds a SERVFAIL for `request`, echoing its ID, opcode and RD bit.
///
/// With `question_end` the first question is copied into the reply;
/// otherwise the reply carries only a header.
pub fn build_servfail(request: &[u8], question_end: Option<usize>) -> Vec<u8> {
    let header = read_header(request).unwrap_or(Header {
        id: 0,
        flags: 0,
        qdcount: 0,
    });

    let question = question_end
        .filter(|&end| end > HEADER_LEN && end <= request.len())
        .map(|end| &request[HEADER_LEN..end]);

    let mut reply = Vec::with_capacity(HEADER_LEN + question.map_or(0, <[u8]>::len));
    reply.extend_from_slice(&header.id.to_be_bytes());
    reply.push(0x80 | (((header.flags & (OPCODE_MASK | FLAG_RD)) >> 8) as u8));
    reply.push(0x80 | RCODE_SERVFAIL);
    reply.extend_from_slice(&[0x00, u8::from(question.is_some())]);
    reply.extend_from_slice(&[0x00; 6]);
    if let Some(question) = question {
        reply.extend_from_slice(question);
    }
    reply
}

/// Checks that `reply` is a well-formed answer to the request with `request_id`.
pub fn validate_reply(request_id: Option<u16>, reply: &[u8]) -> Result<(), DomainError> {
    let header = read_header(reply).ok_or_else(|| {
        DomainError::UpstreamMalformedReply(format!("reply too short ({} bytes)", reply.len()))
    })?;

    if !header.is_response() {
        return Err(DomainError::UpstreamMalformedReply(
            "QR bit not set".to_string(),
        ));
    }

    if let Some(expected) = request_id {
        if header.id != expected {
            return Err(DomainError::UpstreamMalformedReply(format!(
                "ID mismatch: expected {}, got {}",
                expected, header.id
            )));
        }
    }

    Message::from_vec(reply)
        .map_err(|e| DomainError::UpstreamMalformedReply(e.to_string()))?;

    Ok(())
}

/// ID of a raw message, when it is long enough to carry one.
pub fn message_id(message: &[u8]) -> Option<u16> {
    read_header(message).map(|h| h.id)
}
