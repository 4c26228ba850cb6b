use std::net::{Ipv4Addr, Ipv6Addr};

use crate::errors::DnsError;
use crate::packet_buffer::PacketBuffer;
use crate::query_type::QueryType;

/// A resource record, one variant per interpreted type.
///
/// `Unknown` keeps the envelope of a record whose RDATA was skipped on
/// decode; it is not re-emitted on encode (see [`crate::packet::Packet`],
/// which drops unknowns from the section counts as well).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Unknown {
        domain: String,
        qtype: u16,
        data_len: u16,
        ttl: u32,
    },
    A {
        domain: String,
        addr: Ipv4Addr,
        ttl: u32,
    },
    NS {
        domain: String,
        host: String,
        ttl: u32,
    },
    CNAME {
        domain: String,
        host: String,
        ttl: u32,
    },
    MX {
        domain: String,
        priority: u16,
        host: String,
        ttl: u32,
    },
    AAAA {
        domain: String,
        addr: Ipv6Addr,
        ttl: u32,
    },
}

impl Record {
    pub fn read(buffer: &mut PacketBuffer) -> Result<Self, DnsError> {
        let domain = buffer.read_qname()?;
        let qtype_num = buffer.read_u16()?;
        let _class = buffer.read_u16()?;
        let ttl = buffer.read_u32()?;
        let data_len = buffer.read_u16()?;

        let rdata_start = buffer.pos();

        let record = match QueryType::from_u16(qtype_num) {
            QueryType::A => {
                let raw = buffer.read_u32()?;
                Record::A {
                    domain,
                    addr: Ipv4Addr::from(raw),
                    ttl,
                }
            }
            QueryType::AAAA => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(buffer.get_range(rdata_start, 16)?);
                buffer.step(16)?;
                Record::AAAA {
                    domain,
                    addr: Ipv6Addr::from(octets),
                    ttl,
                }
            }
            QueryType::NS => Record::NS {
                domain,
                host: buffer.read_qname()?,
                ttl,
            },
            QueryType::CNAME => Record::CNAME {
                domain,
                host: buffer.read_qname()?,
                ttl,
            },
            QueryType::MX => Record::MX {
                domain,
                priority: buffer.read_u16()?,
                host: buffer.read_qname()?,
                ttl,
            },
            QueryType::Unknown(qtype) => {
                buffer.step(data_len as usize)?;
                Record::Unknown {
                    domain,
                    qtype,
                    data_len,
                    ttl,
                }
            }
        };

        // The RDATA must account for exactly RDLENGTH bytes, or the rest of
        // the packet would be parsed out of phase.
        if buffer.pos() != rdata_start + data_len as usize {
            return Err(DnsError::Malformed(format!(
                "record RDATA length mismatch: declared {}, consumed {}",
                data_len,
                buffer.pos() - rdata_start
            )));
        }

        Ok(record)
    }

    pub fn write(&self, buffer: &mut PacketBuffer) -> Result<usize, DnsError> {
        let start = buffer.pos();

        match self {
            Record::A { domain, addr, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::A.to_u16())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;
                buffer.write_u16(4)?;
                buffer.write_u32(u32::from(*addr))?;
            }
            Record::AAAA { domain, addr, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::AAAA.to_u16())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;
                buffer.write_u16(16)?;
                for &octet in &addr.octets() {
                    buffer.write_u8(octet)?;
                }
            }
            Record::NS { domain, host, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::NS.to_u16())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;
                write_name_rdata(buffer, |buffer| buffer.write_qname(host))?;
            }
            Record::CNAME { domain, host, ttl } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::CNAME.to_u16())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;
                write_name_rdata(buffer, |buffer| buffer.write_qname(host))?;
            }
            Record::MX {
                domain,
                priority,
                host,
                ttl,
            } => {
                buffer.write_qname(domain)?;
                buffer.write_u16(QueryType::MX.to_u16())?;
                buffer.write_u16(1)?;
                buffer.write_u32(*ttl)?;
                write_name_rdata(buffer, |buffer| {
                    buffer.write_u16(*priority)?;
                    buffer.write_qname(host)
                })?;
            }
            Record::Unknown { .. } => {
                // Skipped records are not re-serialised.
            }
        }

        Ok(buffer.pos() - start)
    }

    /// True for records whose RDATA was skipped on decode.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Record::Unknown { .. })
    }

    /// The owner name of this record.
    pub fn domain(&self) -> &str {
        match self {
            Record::Unknown { domain, .. }
            | Record::A { domain, .. }
            | Record::NS { domain, .. }
            | Record::CNAME { domain, .. }
            | Record::MX { domain, .. }
            | Record::AAAA { domain, .. } => domain,
        }
    }
}

/// Writes a two-byte RDLENGTH placeholder, runs `rdata`, then back-patches
/// the placeholder with the number of bytes the closure produced. Needed
/// wherever the RDATA holds a variable-length name.
fn write_name_rdata(
    buffer: &mut PacketBuffer,
    rdata: impl FnOnce(&mut PacketBuffer) -> Result<(), DnsError>,
) -> Result<(), DnsError> {
    let placeholder = buffer.pos();
    buffer.write_u16(0)?;

    rdata(buffer)?;

    let len = buffer.pos() - placeholder - 2;
    buffer.set_u16(placeholder, len as u16)
}
