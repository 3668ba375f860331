use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use led_group::{signals, Shutdown};

/// Mirror a virtual LED's brightness onto a group of existing LEDs.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Name of the virtual LED created as the group leader
    #[arg(value_name = "GROUP_NAME")]
    leader: String,

    /// LEDs under /sys/class/leds that follow the leader (at most 4)
    #[arg(value_name = "LED", num_args = 2.., required = true)]
    followers: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    signals::install().context("failed to install signal handlers")?;

    match led_group::run(&cli.leader, &cli.followers)? {
        Shutdown::SourceClosed => info!("leader event source closed, exiting"),
        Shutdown::Interrupted => info!("termination signal received, exiting"),
    }

    Ok(())
}
