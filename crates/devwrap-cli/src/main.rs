mod cmd_config;
mod cmd_decode;
mod cmd_link;
mod cmd_show;
mod cmd_tier;
mod config;
mod logging;
mod plain;
mod share;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "devwrap", version, about = "Your developer year, unwrapped")]
struct Cli {
    /// Config file (default: <config dir>/devwrap/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Present the stats deck (default when no command is given)
    Show(cmd_show::ShowArgs),
    /// Build a share link from explicit values
    Link {
        /// GitHub handle
        #[arg(long)]
        github: String,
        /// Total GitHub contributions
        #[arg(long, default_value = "0")]
        contributions: u64,
        /// Lines of code written
        #[arg(long, default_value = "0")]
        lines: u64,
        /// Commits that fixed bugs
        #[arg(long, default_value = "0")]
        bugs: u64,
        /// Link origin (default: share_origin from config)
        #[arg(long)]
        origin: Option<String>,
    },
    /// Reconstruct the stats a share link stands for
    Decode {
        /// Share link or bare query string
        link: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify a contribution/bug pair into a developer tier
    Tier {
        /// Total contributions
        #[arg(allow_negative_numbers = true)]
        contributions: i64,
        /// Bug-fix commits
        #[arg(allow_negative_numbers = true)]
        bugs: i64,
    },
    /// Manage config values
    Config {
        #[command(subcommand)]
        cmd: cmd_config::ConfigCmd,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::default_path);
    let cmd = cli
        .cmd
        .unwrap_or_else(|| Command::Show(cmd_show::ShowArgs::default()));

    // The TUI owns the terminal; everything else may also warn on stderr.
    let interactive = matches!(&cmd, Command::Show(args) if !args.plain && cfg!(feature = "tui"));
    let _log_guard = match logging::init(&config::log_dir(), !interactive) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {e}");
            None
        }
    };

    match cmd {
        Command::Show(args) => cmd_show::execute(&config_path, args),
        Command::Link {
            github,
            contributions,
            lines,
            bugs,
            origin,
        } => cmd_link::execute(
            &config_path,
            &github,
            contributions,
            lines,
            bugs,
            origin.as_deref(),
        ),
        Command::Decode { link, json } => cmd_decode::execute(&link, json),
        Command::Tier {
            contributions,
            bugs,
        } => cmd_tier::execute(contributions, bugs),
        Command::Config { cmd } => cmd_config::run(cmd, &config_path),
    }
}
