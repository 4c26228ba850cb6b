//! UDP transport for upstream DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is, no framing. Replies are capped at 512 bytes;
//! anything larger arrives truncated with the TC bit set, which the caller
//! passes through (TCP fallback is out of scope).

use super::DnsTransport;
use async_trait::async_trait;
use cobalt_dns_domain::{DnsError, PACKET_SIZE};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// DNS over UDP. Stateless: every exchange binds its own ephemeral socket,
/// which is released when the call returns on any path.
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DnsError> {
        let bind_addr: SocketAddr = if server.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DnsError::Transport(format!("failed to bind UDP socket: {}", e)))?;

        tokio::time::timeout(timeout, socket.send_to(message, server))
            .await
            .map_err(|_| DnsError::Transport(format!("timeout sending query to {}", server)))?
            .map_err(|e| DnsError::Transport(format!("failed to send query to {}: {}", server, e)))?;

        debug!(server = %server, bytes_sent = message.len(), "UDP query sent");

        let mut recv_buf = vec![0u8; PACKET_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| {
                    DnsError::Transport(format!("timeout waiting for reply from {}", server))
                })?
                .map_err(|e| {
                    DnsError::Transport(format!("failed to receive reply from {}: {}", server, e))
                })?;

        if from_addr.ip() != server.ip() {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP reply from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received, "UDP reply received");

        Ok(recv_buf)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_udp_transport_protocol_name() {
        assert_eq!(UdpTransport::new().protocol_name(), "UDP");
    }
}
