use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use cobalt_dns_domain::{
    DnsError, Packet, PacketBuffer, Question, QueryType, ResolverConfig, ResponseCode,
};
use tracing::debug;

use super::transport::DnsTransport;

/// Authoritative servers are always queried on the standard port.
const UPSTREAM_PORT: u16 = 53;

/// Walks the name-server hierarchy from a root server down to an
/// authoritative answer, following referrals as it goes.
pub struct RecursiveResolver {
    transport: Arc<dyn DnsTransport>,
    root_server: Ipv4Addr,
    query_timeout: Duration,
    max_depth: u8,
}

impl RecursiveResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, config: &ResolverConfig) -> Self {
        Self {
            transport,
            root_server: config.root_server,
            query_timeout: Duration::from_millis(config.query_timeout_ms),
            max_depth: config.max_depth,
        }
    }

    /// Sends a single query to `server` and decodes the reply.
    ///
    /// Truncated (TC=1) responses are returned as-is.
    pub async fn lookup(
        &self,
        qname: &str,
        qtype: QueryType,
        server: Ipv4Addr,
        port: u16,
    ) -> Result<Packet, DnsError> {
        let mut packet = Packet::new();
        packet.header.id = fastrand::u16(..);
        packet.header.recursion_desired = true;
        packet
            .questions
            .push(Question::new(qname.to_string(), qtype));

        let mut req_buffer = PacketBuffer::new();
        packet.write(&mut req_buffer)?;

        let reply = self
            .transport
            .exchange(
                SocketAddr::from((server, port)),
                req_buffer.filled(),
                self.query_timeout,
            )
            .await?;

        let mut res_buffer = PacketBuffer::from_slice(&reply);
        Packet::read(&mut res_buffer)
    }

    /// Resolves `qname`/`qtype` starting from the configured root server.
    ///
    /// Returns the final response packet: a positive answer, a negative
    /// (NXDOMAIN) answer, or the last referral when no further progress is
    /// possible. Glueless delegation chains deeper than the configured
    /// limit fail with [`DnsError::DepthExceeded`].
    pub async fn recursive_lookup(&self, qname: &str, qtype: QueryType) -> Result<Packet, DnsError> {
        self.lookup_at_depth(qname, qtype, 0).await
    }

    /// Depth-carrying worker behind [`Self::recursive_lookup`]. Boxed
    /// because resolving a glueless NS name recurses through it.
    fn lookup_at_depth<'a>(
        &'a self,
        qname: &'a str,
        qtype: QueryType,
        depth: u8,
    ) -> Pin<Box<dyn Future<Output = Result<Packet, DnsError>> + Send + 'a>> {
        Box::pin(async move {
            if depth >= self.max_depth {
                return Err(DnsError::DepthExceeded);
            }

            let mut ns = self.root_server;

            loop {
                debug!(%qname, qtype = %qtype, server = %ns, depth, "querying name server");

                let response = self.lookup(qname, qtype, ns, UPSTREAM_PORT).await?;

                // An authoritative answer, positive or negative, ends the walk.
                if !response.answers.is_empty()
                    && response.header.rescode == ResponseCode::NoError
                {
                    return Ok(response);
                }

                if response.header.rescode == ResponseCode::NxDomain {
                    return Ok(response);
                }

                // Referral with glue: hop straight to the delegated server.
                if let Some(addr) = response.resolved_ns(qname) {
                    ns = addr;
                    continue;
                }

                // Referral without glue: resolve the name server itself,
                // then continue with whatever address that yields.
                let Some(ns_name) = response.unresolved_ns(qname).map(str::to_owned) else {
                    return Ok(response);
                };

                debug!(%qname, ns_host = %ns_name, "resolving glueless name server");

                let ns_response = self
                    .lookup_at_depth(&ns_name, QueryType::A, depth + 1)
                    .await?;

                match ns_response.random_a_record() {
                    Some(addr) => ns = addr,
                    None => return Ok(response),
                }
            }
        })
    }
}
