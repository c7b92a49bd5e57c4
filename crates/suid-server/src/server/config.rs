use clap::Parser;
use suid::{Suid, SuidId};

/// Command-line and environment configuration.
///
/// Every flag has an environment fallback so containerized deployments can
/// run with no arguments; a `.env` file is honored as well.
#[derive(Debug, Parser)]
#[command(name = "suid-server", version, about = "Issues Suid blocks over HTTP")]
pub struct CliArgs {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "SUID_LISTEN_ADDR", default_value = "127.0.0.1:8080")]
    pub listen_addr: String,

    /// Shard id used to bootstrap an empty counter.
    ///
    /// Ignored once the counter exists; the persisted shard is then
    /// authoritative.
    #[arg(long, env = "SUID_SHARD", default_value_t = 0)]
    pub shard: u8,

    /// Directory for the persistent block counter.
    #[cfg(feature = "rocksdb")]
    #[arg(long, env = "SUID_DATA_DIR", default_value = "suid-data")]
    pub data_dir: std::path::PathBuf,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub shard: u8,
    #[cfg(feature = "rocksdb")]
    pub data_dir: std::path::PathBuf,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        // Fail before binding anything: a mis-shaped shard id is an operator
        // error, not something to discover on the first allocation.
        if u64::from(args.shard) > Suid::max_shard() {
            anyhow::bail!(
                "shard {} is out of range for this layout (valid: 0..{})",
                args.shard,
                <Suid as SuidId>::shard_count()
            );
        }
        Ok(Self {
            listen_addr: args.listen_addr,
            shard: args.shard,
            #[cfg(feature = "rocksdb")]
            data_dir: args.data_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("suid-server").chain(argv.iter().copied()))
            .expect("argv should parse")
    }

    #[test]
    fn defaults_apply() {
        let config = ServerConfig::try_from(args(&[])).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.shard, 0);
    }

    #[test]
    fn shard_within_layout_is_accepted() {
        let config = ServerConfig::try_from(args(&["--shard", "1"])).unwrap();
        assert_eq!(config.shard, 1);
    }

    #[test]
    fn out_of_range_shard_is_rejected() {
        let err = ServerConfig::try_from(args(&["--shard", "2"])).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
