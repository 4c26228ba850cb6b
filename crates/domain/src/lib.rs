pub mod config;
pub mod errors;
pub mod header;
pub mod packet;
pub mod packet_buffer;
pub mod query_type;
pub mod question;
pub mod record;
pub mod response_code;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig, ServerConfig};
pub use errors::DnsError;
pub use header::Header;
pub use packet::Packet;
pub use packet_buffer::{PacketBuffer, PACKET_SIZE};
pub use query_type::QueryType;
pub use question::Question;
pub use record::Record;
pub use response_code::ResponseCode;
