#![allow(dead_code)]

mod mock_transport;

pub use mock_transport::MockTransport;

use cobalt_dns_domain::{Packet, QueryType, Record, ResolverConfig, ResponseCode};
use std::net::Ipv4Addr;

pub fn test_config(root_server: Ipv4Addr) -> ResolverConfig {
    ResolverConfig {
        root_server,
        query_timeout_ms: 50,
        max_depth: 16,
    }
}

/// A direct answer: one A record for `name`.
pub fn a_answer(name: &str, addr: Ipv4Addr) -> Packet {
    let mut packet = Packet::new();
    packet.answers.push(Record::A {
        domain: name.to_string(),
        addr,
        ttl: 300,
    });
    packet
}

/// A referral: NS for `zone` pointing at `host`, with optional glue.
pub fn referral(zone: &str, host: &str, glue: Option<Ipv4Addr>) -> Packet {
    let mut packet = Packet::new();
    packet.authorities.push(Record::NS {
        domain: zone.to_string(),
        host: host.to_string(),
        ttl: 172800,
    });
    if let Some(addr) = glue {
        packet.resources.push(Record::A {
            domain: host.to_string(),
            addr,
            ttl: 172800,
        });
    }
    packet
}

/// A negative answer for a name that does not exist.
pub fn nxdomain() -> Packet {
    let mut packet = Packet::new();
    packet.header.rescode = ResponseCode::NxDomain;
    packet
}

/// Encodes a one-question request the way a stub client would send it.
pub fn client_query(id: u16, name: &str, qtype: QueryType) -> Vec<u8> {
    let mut packet = Packet::new();
    packet.header.id = id;
    packet.header.recursion_desired = true;
    packet
        .questions
        .push(cobalt_dns_domain::Question::new(name.to_string(), qtype));

    let mut buffer = cobalt_dns_domain::PacketBuffer::new();
    packet.write(&mut buffer).unwrap();
    buffer.filled().to_vec()
}
