use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How a mock upstream reacts to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Answers with one A record holding the given address.
    Answer([u8; 4]),
    /// Reads the query and never replies.
    Silent,
    /// Replies with a header whose ID does not match the query.
    WrongId,
    /// Answers with the given number of identical A records.
    AnswerMany([u8; 4], u16),
}

/// Upstream resolver stand-in listening on 127.0.0.1 over UDP or TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start_udp(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = queries.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = build_mock_response(&buf[..len], behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn start_tcp(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = queries.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let counter = counter.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            counter.fetch_add(1, Ordering::SeqCst);

                            match build_mock_response(&query, behavior) {
                                Some(response) => {
                                    let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                                    framed.extend_from_slice(&response);
                                    let _ = stream.write_all(&framed).await;
                                }
                                None => {
                                    // hold the connection open past any client timeout
                                    tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                                }
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn build_mock_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }

    let (ip, count) = match behavior {
        MockBehavior::Silent => return None,
        MockBehavior::WrongId => {
            let mut response = query[..12].to_vec();
            response[0] ^= 0xFF;
            response[2] |= 0x80;
            return Some(response);
        }
        MockBehavior::Answer(ip) => (ip, 1),
        MockBehavior::AnswerMany(ip, count) => (ip, count),
    };

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&query[0..2]);
    response.push(0x81);
    response.push(0x80);
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&count.to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    if query.len() > 12 {
        response.extend_from_slice(&query[12..]);
    }

    for _ in 0..count {
        response.extend_from_slice(&[
            0xc0, 0x0c, // pointer to QNAME
            0x00, 0x01, // A
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c, // TTL 60
            0x00, 0x04,
        ]);
        response.extend_from_slice(&ip);
    }

    Some(response)
}
