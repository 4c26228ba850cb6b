use std::sync::Arc;

use cobalt_dns_domain::{Packet, PacketBuffer, ResponseCode};
use tracing::{error, info, warn};

use super::resolver::RecursiveResolver;

/// Turns inbound query packets into response packets.
///
/// Errors never escape: a request that cannot be answered produces a
/// FORMERR or SERVFAIL response, and a datagram that cannot be decoded is
/// dropped.
pub struct DnsRequestHandler {
    resolver: Arc<RecursiveResolver>,
}

impl DnsRequestHandler {
    pub fn new(resolver: Arc<RecursiveResolver>) -> Self {
        Self { resolver }
    }

    /// Decodes one request datagram and produces the reply datagram.
    ///
    /// Returns `None` when the request cannot be parsed or the response
    /// cannot be encoded; the server loop sends nothing in that case.
    pub async fn handle_datagram(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        let mut req_buffer = PacketBuffer::from_slice(datagram);
        let request = match Packet::read(&mut req_buffer) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(error = %e, "failed to parse query packet");
                return None;
            }
        };

        let mut response = self.handle_query(request).await;

        let mut res_buffer = PacketBuffer::new();
        if let Err(e) = response.write(&mut res_buffer) {
            error!(error = %e, "failed to encode response packet");
            return None;
        }

        Some(res_buffer.filled().to_vec())
    }

    /// Answers one request packet.
    ///
    /// The response carries the request id, copies RD, and sets QR and RA.
    /// A request without questions yields FORMERR; a failed resolution
    /// yields SERVFAIL; otherwise the recursive lookup's rcode and record
    /// sections are passed through and the request's questions are echoed.
    pub async fn handle_query(&self, request: Packet) -> Packet {
        let mut response = Packet::new();
        response.header.id = request.header.id;
        response.header.recursion_desired = request.header.recursion_desired;
        response.header.recursion_available = true;
        response.header.response = true;

        let Some(question) = request.questions.first().cloned() else {
            response.header.rescode = ResponseCode::FormErr;
            return response;
        };

        info!(name = %question.name, qtype = %question.qtype, "received query");

        match self
            .resolver
            .recursive_lookup(&question.name, question.qtype)
            .await
        {
            Ok(result) => {
                response.header.rescode = result.header.rescode;
                response.answers = result.answers;
                response.authorities = result.authorities;
                response.resources = result.resources;
            }
            Err(e) => {
                warn!(name = %question.name, error = %e, "recursive lookup failed");
                response.header.rescode = ResponseCode::ServFail;
            }
        }

        response.questions = request.questions;

        response
    }
}
