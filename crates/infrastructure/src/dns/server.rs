use crate::dns::wire;
use async_trait::async_trait;
use ferrous_split_application::ports::ResponseWriter;
use ferrous_split_application::use_cases::HandleQueryUseCase;
use ferrous_split_domain::{DomainError, ForwardQuery, QueryOutcome};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Transport a query arrived on. The upstream exchange uses the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerProtocol {
    Udp,
    Tcp,
}

impl ListenerProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

impl fmt::Display for ListenerProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the single reply for one query until the listener sends it.
#[derive(Debug, Default)]
pub struct BufferedResponseWriter {
    reply: Option<Vec<u8>>,
}

impl BufferedResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_reply(self) -> Option<Vec<u8>> {
        self.reply
    }
}

#[async_trait]
impl ResponseWriter for BufferedResponseWriter {
    async fn write_reply(&mut self, reply: &[u8]) -> Result<(), DomainError> {
        if self.reply.is_some() {
            return Err(DomainError::ReplyAlreadyWritten);
        }
        self.reply = Some(reply.to_vec());
        Ok(())
    }

    fn has_written(&self) -> bool {
        self.reply.is_some()
    }
}

/// Host dispatcher: turns raw request bytes into the bytes to send back.
#[derive(Clone)]
pub struct DnsServerHandler {
    udp: Arc<HandleQueryUseCase>,
    tcp: Arc<HandleQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(udp: Arc<HandleQueryUseCase>, tcp: Arc<HandleQueryUseCase>) -> Self {
        Self { udp, tcp }
    }

    /// Returns `None` when the datagram must be dropped silently.
    ///
    /// Anything that is not a forwarded upstream reply is answered with a
    /// SERVFAIL built from the request.
    pub async fn handle_raw(&self, buf: &[u8], protocol: ListenerProtocol) -> Option<Vec<u8>> {
        let header = wire::read_header(buf)?;
        if header.is_response() {
            debug!(protocol = %protocol, id = header.id, "Dropping message with QR set");
            return None;
        }

        let question = match wire::parse_question(buf) {
            Ok(question) => question,
            Err(e) => {
                debug!(protocol = %protocol, id = header.id, error = %e, "Unparseable request");
                return Some(wire::build_servfail(buf, None));
            }
        };

        let query = ForwardQuery::new(question.name.as_str(), buf, header.rcode());
        let use_case = match protocol {
            ListenerProtocol::Udp => &self.udp,
            ListenerProtocol::Tcp => &self.tcp,
        };

        let mut writer = BufferedResponseWriter::new();
        let outcome = use_case.execute(&query, &mut writer).await;

        match outcome {
            QueryOutcome::Forwarded { upstream } => {
                debug!(
                    domain = %query.name,
                    qtype = question.qtype,
                    qclass = question.qclass,
                    upstream = %upstream,
                    protocol = %protocol,
                    "Query forwarded"
                );
                writer
                    .into_reply()
                    .or_else(|| Some(wire::build_servfail(buf, Some(question.end))))
            }
            QueryOutcome::Rejected | QueryOutcome::Failed { .. } => {
                debug!(
                    domain = %query.name,
                    qtype = question.qtype,
                    qclass = question.qclass,
                    protocol = %protocol,
                    "Answering with SERVFAIL"
                );
                Some(wire::build_servfail(buf, Some(question.end)))
            }
        }
    }
}
