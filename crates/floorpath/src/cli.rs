use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "floorpath")]
#[command(author, version, about)]
#[command(long_about = "Draw precomputed multi-floor routes on SVG floor plans.\n\n\
    A route bundle is a JSON file with floors, route geometry and cached routes.\n\n\
    Examples:\n  \
    floorpath render building.json --to lab -o out     Write one SVG per floor\n  \
    floorpath render building.json --to lab --smil     Animated SVGs\n  \
    floorpath schedule building.json --to lab          Print the reveal timeline\n  \
    floorpath play building.json --to lab --rate 2     Play the animation")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments shared by every command that routes through a bundle.
#[derive(clap::Args, Clone)]
pub struct RouteArgs {
    /// Route bundle (JSON)
    pub bundle: PathBuf,

    /// Destination door id
    #[arg(long)]
    pub to: String,

    /// Start door id (defaults to the configured start point)
    #[arg(long)]
    pub from: Option<String>,

    /// Prefer accessible routes
    #[arg(long)]
    pub accessible: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the route and write one SVG per floor
    Render {
        #[command(flatten)]
        route: RouteArgs,

        /// Output directory for SVG files
        #[arg(short, long, default_value = "floorpath-out")]
        output_dir: PathBuf,

        /// Embed the reveal animation as SMIL
        #[arg(long)]
        smil: bool,
    },

    /// Print the reveal timeline of a route
    Schedule {
        #[command(flatten)]
        route: RouteArgs,

        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play the route animation in real time
    Play {
        #[command(flatten)]
        route: RouteArgs,

        /// Playback speed multiplier
        #[arg(long, default_value = "1.0")]
        rate: f64,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. path.color, path.speed, route.zoom)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Render {
                route,
                output_dir,
                smil,
            }) => crate::commands::render::run(&route, &output_dir, smil),
            Some(Commands::Schedule { route, json }) => {
                crate::commands::schedule::run(&route, json)
            }
            Some(Commands::Play { route, rate }) => {
                if !(rate.is_finite() && rate > 0.0) {
                    anyhow::bail!("Invalid rate: {rate}. Must be greater than zero.");
                }
                crate::commands::play::run(&route, rate)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
