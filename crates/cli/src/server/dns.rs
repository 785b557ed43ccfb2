use dns_relay_infrastructure::dns::server::DnsServerHandler;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    max_request_size: usize,
) -> anyhow::Result<()> {
    let socket = UdpSocket::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind UDP socket on {}: {}", bind_addr, e))?;

    info!(bind_address = %socket.local_addr()?, max_request_size, "DNS relay listening");

    serve_udp(&socket, &handler, max_request_size).await
}

/// Handles one datagram at a time, replying to its source before reading the
/// next. Datagrams longer than `max_request_size` are cut off by the kernel.
pub async fn serve_udp(
    socket: &UdpSocket,
    handler: &DnsServerHandler,
    max_request_size: usize,
) -> anyhow::Result<()> {
    let mut recv_buf = vec![0u8; max_request_size];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "Failed to receive datagram");
                continue;
            }
        };

        debug!(client = %from, bytes = n, "Datagram received");

        let Some(reply) = handler.handle_raw_udp(&recv_buf[..n], from).await else {
            continue;
        };

        if let Err(e) = socket.send_to(&reply, from).await {
            warn!(client = %from, error = %e, "Failed to send response");
        }
    }
}
