use clap::Parser;

use crate::error::ArborError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7777";
const DEFAULT_ROOT_USERNAME: &str = "root";
const DEFAULT_ROOT_CONTENT: &str = "Welcome to our server!";
const DEFAULT_RECENT_SIZE: usize = 100;

#[derive(Parser, Clone, Debug)]
#[clap(author, version, about = "A chat server for tree-structured conversations")]
pub struct Cli {
    /// Address to bind the listener on.
    #[arg(default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: String,

    /// Username attached to the root message.
    #[arg(long = "ruser", default_value = DEFAULT_ROOT_USERNAME)]
    pub root_username: String,

    /// Override the root message's identifier instead of auto-assigning one.
    #[arg(long = "rid")]
    pub root_id: Option<String>,

    /// Body text of the root message.
    #[arg(long = "rcontent", default_value = DEFAULT_ROOT_CONTENT)]
    pub root_content: String,

    /// Maximum number of recent leaves tracked at once.
    #[arg(long = "recent-size", default_value_t = DEFAULT_RECENT_SIZE)]
    pub recent_size: usize,
}

/// A validated, ready-to-run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub root_username: String,
    pub root_id: Option<String>,
    pub root_content: String,
    pub recent_size: usize,
}

impl TryFrom<Cli> for Config {
    type Error = ArborError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.recent_size < 1 {
            return Err(ArborError::InvalidCapacity(cli.recent_size as i64));
        }
        Ok(Self {
            bind_addr: cli.bind_addr,
            root_username: cli.root_username,
            root_id: cli.root_id,
            root_content: cli.root_content,
            recent_size: cli.recent_size,
        })
    }
}
