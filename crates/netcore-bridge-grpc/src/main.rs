use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use netcore_bridge_core::{BridgeConfig, TransportTarget};
use netcore_bridge_grpc::NetCoreBridge;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "netcore-bridge",
    version,
    about = "Diagnostics for the NetCore decision bridge"
)]
struct Cli {
    #[command(flatten)]
    target: TargetArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct TargetArgs {
    /// Decision service domain socket, e.g. /tmp/homeassistant_core.sock
    #[arg(long, global = true, env = "NETCORE_BRIDGE_SOCKET", conflicts_with = "tcp")]
    socket: Option<PathBuf>,
    /// Decision service loopback address, e.g. 127.0.0.1:50051
    #[arg(long, global = true, env = "NETCORE_BRIDGE_TCP")]
    tcp: Option<SocketAddr>,
    /// Upper bound for a single decision call, in milliseconds.
    #[arg(long, global = true, default_value_t = 5000, env = "NETCORE_BRIDGE_TIMEOUT_MS")]
    timeout_ms: u64,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Probe all three decision channels and print the report.
    Selftest {
        /// Print the report as JSON instead of summary lines.
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Settling delay before probing, in milliseconds. Defaults to the
        /// bridge's self-test delay.
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the transport target the bridge would use.
    Target,
}

impl TargetArgs {
    fn config(&self) -> BridgeConfig {
        let target = match (&self.socket, self.tcp) {
            (Some(path), _) => TransportTarget::Unix(path.clone()),
            (None, Some(addr)) => TransportTarget::Tcp(addr),
            (None, None) => TransportTarget::for_current_platform(),
        };
        BridgeConfig::default()
            .with_target(target)
            .with_decision_timeout(Duration::from_millis(self.timeout_ms))
    }
}

fn settling_delay(config: &BridgeConfig, delay_ms: Option<u64>) -> Duration {
    delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.self_test_delay)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "netcore_bridge=info,info".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.target.config();

    match cli.command {
        Command::Target => {
            config.validate()?;
            println!("{}", config.target);
        }
        Command::Selftest { json, delay_ms } => {
            let delay = settling_delay(&config, delay_ms);
            let bridge = NetCoreBridge::connect(config)?;
            info!(transport = %bridge.channel().target(), "netcore-bridge self-test starting");

            let report = bridge.self_test().run_after(delay).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in report.summary() {
                    println!("{}", line);
                }
            }

            if !report.passed() {
                anyhow::bail!("self-test failed against {}", bridge.channel().target());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selftest_waits_configured_delay_unless_overridden() {
        let cli = Cli::parse_from(["netcore-bridge", "--tcp", "127.0.0.1:50051", "selftest"]);
        let config = cli.target.config();
        let Command::Selftest { delay_ms, .. } = cli.command else {
            panic!("expected selftest");
        };
        assert_eq!(delay_ms, None);
        assert_eq!(settling_delay(&config, delay_ms), config.self_test_delay);
        assert_eq!(config.self_test_delay, Duration::from_secs(2));

        let cli = Cli::parse_from(["netcore-bridge", "selftest", "--delay-ms", "250"]);
        let Command::Selftest { delay_ms, .. } = cli.command else {
            panic!("expected selftest");
        };
        assert_eq!(
            settling_delay(&BridgeConfig::default(), delay_ms),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn tcp_flag_selects_loopback_target() {
        let cli = Cli::parse_from(["netcore-bridge", "target", "--tcp", "127.0.0.1:6000"]);
        assert_eq!(cli.target.config().target.to_string(), "127.0.0.1:6000");
    }
}
