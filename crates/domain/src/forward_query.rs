use std::sync::Arc;

/// Header RCODE value meaning "no error".
pub const RCODE_NO_ERROR: u16 = 0;

/// A parsed incoming query as handed over by the host dispatcher.
#[derive(Debug, Clone)]
pub struct ForwardQuery {
    /// Query name as it appeared in the question section.
    pub name: Arc<str>,
    /// The request exactly as received; forwarded byte-for-byte.
    pub raw_message: Arc<[u8]>,
    /// RCODE carried in the *request* header.
    pub request_rcode: u16,
}

impl ForwardQuery {
    pub fn new(
        name: impl Into<Arc<str>>,
        raw_message: impl Into<Arc<[u8]>>,
        request_rcode: u16,
    ) -> Self {
        Self {
            name: name.into(),
            raw_message: raw_message.into(),
            request_rcode,
        }
    }

    pub fn request_is_clean(&self) -> bool {
        self.request_rcode == RCODE_NO_ERROR
    }
}
