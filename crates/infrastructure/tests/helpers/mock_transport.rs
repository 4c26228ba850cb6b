use async_trait::async_trait;
use cobalt_dns_domain::{DnsError, Packet, PacketBuffer, QueryType};
use cobalt_dns_infrastructure::dns::transport::DnsTransport;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Scripted in-memory name-server fleet.
///
/// Each entry plays the role of one server answering one question; the
/// response template gets the query's id and question section stamped onto
/// it, as a real server would. Queries with no matching entry fail like an
/// unreachable host.
pub struct MockTransport {
    zones: HashMap<(IpAddr, String, u16), Packet>,
    query_count: AtomicU64,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            zones: HashMap::new(),
            query_count: AtomicU64::new(0),
        }
    }

    pub fn answer(&mut self, server: Ipv4Addr, qname: &str, qtype: QueryType, response: Packet) {
        self.zones.insert(
            (IpAddr::V4(server), qname.to_string(), qtype.to_u16()),
            response,
        );
    }

    pub fn query_count(&self) -> u64 {
        self.query_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        _timeout: Duration,
    ) -> Result<Vec<u8>, DnsError> {
        self.query_count.fetch_add(1, Ordering::Relaxed);

        let mut buffer = PacketBuffer::from_slice(message);
        let query = Packet::read(&mut buffer)?;
        let question = query
            .questions
            .first()
            .cloned()
            .ok_or_else(|| DnsError::Transport("query carried no question".to_string()))?;

        let key = (server.ip(), question.name.clone(), question.qtype.to_u16());
        let Some(template) = self.zones.get(&key) else {
            return Err(DnsError::Transport(format!(
                "no route to {} for {}",
                server, question.name
            )));
        };

        let mut response = template.clone();
        response.header.id = query.header.id;
        response.header.response = true;
        response.questions = query.questions;

        let mut out = PacketBuffer::new();
        response.write(&mut out)?;
        Ok(out.filled().to_vec())
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }
}
