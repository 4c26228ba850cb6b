use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Where every resolution starts: a root name server address.
    #[serde(default = "default_root_server")]
    pub root_server: Ipv4Addr,

    /// Per-upstream-query timeout in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// How deep glueless name-server chains may nest before giving up.
    #[serde(default = "default_max_depth")]
    pub max_depth: u8,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            query_timeout_ms: default_query_timeout_ms(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_root_server() -> Ipv4Addr {
    // a.root-servers.net
    Ipv4Addr::new(198, 41, 0, 4)
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_max_depth() -> u8 {
    16
}
