use crate::errors::DnsError;
use crate::packet_buffer::PacketBuffer;
use crate::query_type::QueryType;

/// A question entry: the name being asked about and the record type wanted.
/// The class is always IN and is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: QueryType,
}

impl Question {
    pub fn new(name: String, qtype: QueryType) -> Self {
        Self { name, qtype }
    }

    pub fn read(buffer: &mut PacketBuffer) -> Result<Self, DnsError> {
        let name = buffer.read_qname()?;
        let qtype = QueryType::from_u16(buffer.read_u16()?);
        let _class = buffer.read_u16()?;

        Ok(Self { name, qtype })
    }

    pub fn write(&self, buffer: &mut PacketBuffer) -> Result<(), DnsError> {
        buffer.write_qname(&self.name)?;
        buffer.write_u16(self.qtype.to_u16())?;
        buffer.write_u16(1)?;

        Ok(())
    }
}
