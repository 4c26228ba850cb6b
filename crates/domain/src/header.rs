use crate::errors::DnsError;
use crate::packet_buffer::PacketBuffer;
use crate::response_code::ResponseCode;

/// The 12-byte DNS message header (RFC 1035 §4.1.1).
///
/// Flag bytes use the conventional layout, most significant bit first:
/// byte one carries {QR, Opcode, AA, TC, RD}, byte two {RA, Z, AD, CD,
/// RCODE}. All multi-byte fields are big-endian.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,

    pub response: bool,
    pub opcode: u8,
    pub authoritative_answer: bool,
    pub truncated_message: bool,
    pub recursion_desired: bool,

    pub recursion_available: bool,
    pub z: bool,
    pub authed_data: bool,
    pub checking_disabled: bool,
    pub rescode: ResponseCode,

    pub questions: u16,
    pub answers: u16,
    pub authoritative_entries: u16,
    pub resource_entries: u16,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(buffer: &mut PacketBuffer) -> Result<Self, DnsError> {
        let id = buffer.read_u16()?;
        let flags = buffer.read_u16()?;

        let first = (flags >> 8) as u8;
        let second = (flags & 0xFF) as u8;

        Ok(Self {
            id,
            response: first & (1 << 7) > 0,
            opcode: (first >> 3) & 0x0F,
            authoritative_answer: first & (1 << 2) > 0,
            truncated_message: first & (1 << 1) > 0,
            recursion_desired: first & 1 > 0,
            recursion_available: second & (1 << 7) > 0,
            z: second & (1 << 6) > 0,
            authed_data: second & (1 << 5) > 0,
            checking_disabled: second & (1 << 4) > 0,
            rescode: ResponseCode::from_u8(second & 0x0F),
            questions: buffer.read_u16()?,
            answers: buffer.read_u16()?,
            authoritative_entries: buffer.read_u16()?,
            resource_entries: buffer.read_u16()?,
        })
    }

    pub fn write(&self, buffer: &mut PacketBuffer) -> Result<(), DnsError> {
        buffer.write_u16(self.id)?;

        let first = flag(self.response, 7)
            | (self.opcode & 0x0F) << 3
            | flag(self.authoritative_answer, 2)
            | flag(self.truncated_message, 1)
            | flag(self.recursion_desired, 0);
        buffer.write_u8(first)?;

        let second = flag(self.recursion_available, 7)
            | flag(self.z, 6)
            | flag(self.authed_data, 5)
            | flag(self.checking_disabled, 4)
            | self.rescode.to_u8();
        buffer.write_u8(second)?;

        buffer.write_u16(self.questions)?;
        buffer.write_u16(self.answers)?;
        buffer.write_u16(self.authoritative_entries)?;
        buffer.write_u16(self.resource_entries)?;

        Ok(())
    }
}

fn flag(set: bool, shift: u8) -> u8 {
    if set {
        1 << shift
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_round_trip() {
        let header = Header {
            id: 0x862A,
            response: true,
            opcode: 2,
            authoritative_answer: true,
            truncated_message: false,
            recursion_desired: true,
            recursion_available: true,
            z: false,
            authed_data: true,
            checking_disabled: false,
            rescode: ResponseCode::NxDomain,
            questions: 1,
            answers: 2,
            authoritative_entries: 3,
            resource_entries: 4,
        };

        let mut buffer = PacketBuffer::new();
        header.write(&mut buffer).unwrap();
        assert_eq!(buffer.pos(), 12);

        buffer.seek(0).unwrap();
        assert_eq!(Header::read(&mut buffer).unwrap(), header);
    }

    #[test]
    fn test_wire_layout() {
        let mut header = Header::new();
        header.id = 0x1234;
        header.response = true;
        header.recursion_desired = true;
        header.recursion_available = true;
        header.rescode = ResponseCode::ServFail;

        let mut buffer = PacketBuffer::new();
        header.write(&mut buffer).unwrap();

        // QR|RD in the first flag byte, RA|rcode in the second.
        assert_eq!(buffer.get(2).unwrap(), 0x81);
        assert_eq!(buffer.get(3).unwrap(), 0x82);
    }
}
