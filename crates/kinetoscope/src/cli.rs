//! Command-line interface.
//!
//! # Examples
//!
//! ```bash
//! # View, then answer the save prompt
//! kinetoscope ballistic
//!
//! # Export without viewing or asking
//! kinetoscope lissajous --no-view --save --output loop.mp4
//!
//! # Start a config file from the defaults
//! kinetoscope config ballistic > ballistic.toml
//! kinetoscope ballistic --config ballistic.toml
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Animated ballistic trajectories and Lissajous figures.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kinetoscope",
    author,
    version,
    about = "Animated ballistic trajectories and Lissajous figures",
    long_about = "Plays classroom kinematics animations in the terminal and \
                  optionally exports them to a video file with ffmpeg."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Projectile trajectories drawn point by point
    Ballistic(RunArgs),

    /// Lissajous figure with a rotating phase
    Lissajous(RunArgs),

    /// Print the default configuration as TOML
    Config {
        #[arg(value_enum)]
        animation: AnimationKind,
    },
}

/// Which animation.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Ballistic,
    Lissajous,
}

/// Options shared by the animation subcommands.
#[derive(Args, Debug, Clone, Default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
pub struct RunArgs {
    /// TOML file overriding the default configuration
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Skip the interactive view
    #[arg(long)]
    pub no_view: bool,

    /// Export without asking
    #[arg(long, conflicts_with = "no_save")]
    pub save: bool,

    /// Do not export and do not ask
    #[arg(long)]
    pub no_save: bool,

    /// Output video file, overriding the configured file name
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Encoder program to run instead of ffmpeg
    #[arg(long)]
    pub encoder: Option<String>,

    /// TrueType font for text in exported frames
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Run in the main terminal buffer instead of the alternate screen
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Disable colors in the interactive view
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl RunArgs {
    /// The save decision given on the command line, if any.
    pub const fn save_answer(&self) -> Option<bool> {
        if self.save {
            Some(true)
        } else if self.no_save {
            Some(false)
        } else {
            None
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Log level based on verbosity.
    pub const fn log_level(&self) -> LogLevel {
        match self.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Log level for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only show warnings and errors
    Warn,
    /// Show lifecycle messages
    Info,
    /// Show settings and sampling details
    Debug,
    /// Show every frame
    Trace,
}

impl LogLevel {
    /// Directive for an `EnvFilter`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}
