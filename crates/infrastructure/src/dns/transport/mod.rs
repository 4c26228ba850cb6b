use async_trait::async_trait;
use cobalt_dns_domain::DnsError;
use std::net::SocketAddr;
use std::time::Duration;

mod udp;

pub use udp::UdpTransport;

/// One-shot datagram exchange with a name server.
///
/// The resolver hops between servers as it follows referrals, so the target
/// address is a per-call argument rather than connection state.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends `message` to `server` as a single datagram and waits for one
    /// reply, bounded by `timeout`. Failures and timeouts surface as
    /// [`DnsError::Transport`].
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DnsError>;

    fn protocol_name(&self) -> &'static str;
}
