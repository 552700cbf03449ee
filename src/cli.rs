//! Command-line interface.

use clap::Parser;

use crate::config::{ListenerConfig, ProxyConfig, DEFAULT_BIND_ADDRESS};

#[derive(Debug, Parser)]
#[command(name = "forward-proxy")]
#[command(about = "Transparent HTTP forward proxy", long_about = None)]
pub struct Cli {
    /// The address of the proxy server.
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub addr: String,
}

impl Cli {
    /// Build the proxy configuration from parsed flags.
    pub fn into_config(self) -> ProxyConfig {
        ProxyConfig {
            listener: ListenerConfig {
                bind_address: self.addr,
            },
        }
    }
}
