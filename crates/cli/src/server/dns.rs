use ferrous_split_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use ferrous_split_infrastructure::dns::transport::udp::MAX_UDP_MESSAGE_SIZE;
use ferrous_split_infrastructure::dns::{DnsServerHandler, ListenerProtocol};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DnsServerOptions {
    pub bind_addr: SocketAddr,
    pub udp_workers: usize,
    pub tcp_enabled: bool,
}

pub async fn start_dns_server(
    options: DnsServerOptions,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr = options.bind_addr;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let num_workers = options.udp_workers.max(1);

    info!(bind_address = %socket_addr, num_workers, "Starting DNS server with SO_REUSEPORT");

    let handler = Arc::new(handler);
    let mut join_set: JoinSet<()> = JoinSet::new();

    for i in 0..num_workers {
        let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
        let handler_udp = handler.clone();
        let token = shutdown.clone();
        join_set.spawn(async move {
            run_udp_worker(udp_socket, handler_udp, i, token).await;
        });
    }

    if options.tcp_enabled {
        let tcp_listener = create_tcp_listener(domain, socket_addr)?;
        let handler_tcp = handler.clone();
        let token = shutdown.clone();
        join_set.spawn(async move {
            run_tcp_listener(tcp_listener, handler_tcp, token).await;
        });
    }

    info!(
        "DNS server ready: {} UDP workers on {} (tcp: {})",
        num_workers, socket_addr, options.tcp_enabled
    );

    while join_set.join_next().await.is_some() {}
    info!("DNS server stopped");
    Ok(())
}

async fn run_udp_worker(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    worker_id: usize,
    shutdown: CancellationToken,
) {
    let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (n, from) = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) => {
                    error!(worker = worker_id, error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let handler = handler.clone();
        let socket = socket.clone();
        let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw(&owned_buf, ListenerProtocol::Udp).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "UDP send failed");
                }
            }
        });
    }
}

async fn run_tcp_listener(
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) {
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(error = %e, "TCP accept error");
                    continue;
                }
            },
        };

        let handler = handler.clone();
        let token = shutdown.clone();
        tokio::spawn(async move {
            serve_tcp_connection(stream, peer, handler, token).await;
        });
    }
}

/// Answers length-prefixed queries on one connection until it goes idle.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) {
    loop {
        let request = tokio::select! {
            _ = shutdown.cancelled() => break,
            read = tokio::time::timeout(TCP_IDLE_TIMEOUT, read_with_length_prefix(&mut stream)) => {
                match read {
                    Ok(Ok(request)) => request,
                    Ok(Err(_)) | Err(_) => break,
                }
            }
        };

        let Some(response) = handler.handle_raw(&request, ListenerProtocol::Tcp).await else {
            continue;
        };

        if let Err(e) = send_with_length_prefix(&mut stream, &response).await {
            debug!(client = %peer, error = %e, "TCP send failed");
            break;
        }
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
