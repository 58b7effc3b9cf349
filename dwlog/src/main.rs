use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dwlog_core::cli;
use dwlog_core::conf::load_config;
use dwlog_core::logging::init_logging;
use dwlog_core::server;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dwlog",
    version,
    about = "dwlog: network node log analytics server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the dwlog server (default)
    Run {
        /// Config file or the directory holding dwlog.hcl
        #[arg(long, default_value = "config")]
        config: PathBuf,

        /// Override server.listen
        #[arg(long)]
        listen: Option<String>,
    },

    /// Scan a log directory and print its statistics
    Scan {
        /// Directory with *.log files
        dir: PathBuf,

        /// Entries per top-N chart (1-20)
        #[arg(long)]
        top: Option<usize>,

        /// Disable colors
        #[arg(long)]
        plain: bool,
    },

    /// Configuration tooling
    Conf {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Run { config, listen }) => run(config, listen),
        Some(Command::Scan { dir, top, plain }) => cli::scan::scan(dir, top, plain),
        Some(Command::Conf { cmd }) => cli::conf::run(cmd),
        None => run(PathBuf::from("config"), None),
    }
}

fn run(config_path: PathBuf, listen: Option<String>) -> Result<()> {
    init_logging();

    let mut config = load_config(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    if let Some(listen) = listen {
        listen
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid --listen address '{listen}'"))?;
        config.server.listen = listen;
    }

    server::run(config).context("failed to start dwlog server")
}
