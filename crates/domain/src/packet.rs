use std::net::Ipv4Addr;

use crate::errors::DnsError;
use crate::header::Header;
use crate::packet_buffer::PacketBuffer;
use crate::question::Question;
use crate::record::Record;

/// A full DNS message: header plus the four record sections.
///
/// On decode the section lengths come from the header counts; on encode the
/// header counts are rewritten from the section lengths, with skipped
/// (`Unknown`) records excluded from both the counts and the output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub resources: Vec<Record>,
}

impl Packet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(buffer: &mut PacketBuffer) -> Result<Self, DnsError> {
        let header = Header::read(buffer)?;

        let mut questions = Vec::with_capacity(header.questions as usize);
        for _ in 0..header.questions {
            questions.push(Question::read(buffer)?);
        }

        let mut answers = Vec::with_capacity(header.answers as usize);
        for _ in 0..header.answers {
            answers.push(Record::read(buffer)?);
        }

        let mut authorities = Vec::with_capacity(header.authoritative_entries as usize);
        for _ in 0..header.authoritative_entries {
            authorities.push(Record::read(buffer)?);
        }

        let mut resources = Vec::with_capacity(header.resource_entries as usize);
        for _ in 0..header.resource_entries {
            resources.push(Record::read(buffer)?);
        }

        Ok(Self {
            header,
            questions,
            answers,
            authorities,
            resources,
        })
    }

    pub fn write(&mut self, buffer: &mut PacketBuffer) -> Result<(), DnsError> {
        self.header.questions = self.questions.len() as u16;
        self.header.answers = emitted_count(&self.answers);
        self.header.authoritative_entries = emitted_count(&self.authorities);
        self.header.resource_entries = emitted_count(&self.resources);

        self.header.write(buffer)?;

        for question in &self.questions {
            question.write(buffer)?;
        }
        for record in emitted(&self.answers) {
            record.write(buffer)?;
        }
        for record in emitted(&self.authorities) {
            record.write(buffer)?;
        }
        for record in emitted(&self.resources) {
            record.write(buffer)?;
        }

        Ok(())
    }

    /// A uniformly random A-record address from the answer section.
    pub fn random_a_record(&self) -> Option<Ipv4Addr> {
        let candidates: Vec<Ipv4Addr> = self
            .answers
            .iter()
            .filter_map(|record| match record {
                Record::A { addr, .. } => Some(*addr),
                _ => None,
            })
            .collect();

        if candidates.is_empty() {
            None
        } else {
            Some(candidates[fastrand::usize(..candidates.len())])
        }
    }

    /// Hosts of authority NS entries whose zone covers `qname`.
    fn covering_ns_hosts<'a>(&'a self, qname: &'a str) -> impl Iterator<Item = &'a str> {
        self.authorities.iter().filter_map(move |record| match record {
            Record::NS { domain, host, .. } if zone_serves(domain, qname) => {
                Some(host.as_str())
            }
            _ => None,
        })
    }

    /// The address of the first covering name server that has glue: an A
    /// record in the additional section whose owner is the NS host.
    pub fn resolved_ns(&self, qname: &str) -> Option<Ipv4Addr> {
        self.covering_ns_hosts(qname).find_map(|host| {
            self.resources.iter().find_map(|record| match record {
                Record::A { domain, addr, .. } if domain == host => Some(*addr),
                _ => None,
            })
        })
    }

    /// A uniformly random covering name-server host, for when no glue is
    /// available and the server itself must be resolved.
    pub fn unresolved_ns<'a>(&'a self, qname: &'a str) -> Option<&'a str> {
        let hosts: Vec<&str> = self.covering_ns_hosts(qname).collect();

        if hosts.is_empty() {
            None
        } else {
            Some(hosts[fastrand::usize(..hosts.len())])
        }
    }
}

fn emitted(records: &[Record]) -> impl Iterator<Item = &Record> {
    records.iter().filter(|record| !record.is_unknown())
}

fn emitted_count(records: &[Record]) -> u16 {
    emitted(records).count() as u16
}

/// True when `zone` covers `qname`: the zone's labels are a trailing
/// subsequence of the query's. The root zone (empty string) covers
/// everything. Inputs are normalised (lowercase, no trailing dot).
fn zone_serves(zone: &str, qname: &str) -> bool {
    zone.is_empty()
        || qname == zone
        || qname
            .strip_suffix(zone)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
