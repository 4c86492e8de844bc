//! WireWorld CLI - edit, extend, step and play WireWorld boards.
//!
//! Boards are stored as NumPy `.npy` files of `int8` cell values.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use wireworld_automaton::CellState;

mod commands;
mod config;
mod render;
mod viewport;

use commands::config as config_cmd;
use commands::{edit, extend::ExtendOptions, new::NewOptions, run::RunOptions, show::ShowOptions};
use config::Config;
use render::RenderStyle;

/// WireWorld CLI - run Brian Silverman's wire automaton in the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "ww",
    author,
    version,
    about = "WireWorld: edit and play cellular automaton boards",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a board file holding the seed circuit or an empty board.
    New {
        /// Board file to create.
        file: PathBuf,

        /// Start from an empty board instead of the seed circuit.
        #[arg(long)]
        empty: bool,

        /// Width of the empty board (defaults to config board-width).
        #[arg(long, requires = "empty")]
        width: Option<usize>,

        /// Height of the empty board (defaults to config board-height).
        #[arg(long, requires = "empty")]
        height: Option<usize>,

        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Render part of a board.
    Show {
        file: PathBuf,

        /// Leftmost column of the view.
        #[arg(short, long, default_value_t = 0)]
        x: usize,

        /// Top row of the view.
        #[arg(short, long, default_value_t = 0)]
        y: usize,

        /// View width in cells (defaults to config view-width).
        #[arg(long)]
        width: Option<usize>,

        /// View height in cells (defaults to config view-height).
        #[arg(long)]
        height: Option<usize>,

        /// Pad the view with empty cells past the board edge.
        #[arg(long)]
        pad: bool,

        /// Draw with ASCII glyphs instead of colour.
        #[arg(long)]
        plain: bool,

        /// Print the view as JSON.
        #[arg(long, conflicts_with = "plain")]
        json: bool,
    },

    /// Paint one cell.
    #[command(allow_negative_numbers = true)]
    Set {
        file: PathBuf,
        x: i64,
        y: i64,
        /// empty, head, tail, conductor, or 0-3.
        state: CellState,
    },

    /// Clear one cell.
    #[command(allow_negative_numbers = true)]
    Erase { file: PathBuf, x: i64, y: i64 },

    /// Cycle one cell through the states.
    #[command(allow_negative_numbers = true)]
    Cycle { file: PathBuf, x: i64, y: i64 },

    /// Grow a board with empty cells on any side.
    #[command(allow_negative_numbers = true)]
    Extend {
        file: PathBuf,

        #[arg(long, default_value_t = 0)]
        left: i64,

        #[arg(long, default_value_t = 0)]
        right: i64,

        #[arg(long, default_value_t = 0)]
        top: i64,

        #[arg(long, default_value_t = 0)]
        bottom: i64,

        /// Current view column, reported after the shift.
        #[arg(short, long, default_value_t = 0)]
        x: usize,

        /// Current view row, reported after the shift.
        #[arg(short, long, default_value_t = 0)]
        y: usize,
    },

    /// Advance a board and save it.
    Step {
        file: PathBuf,

        /// Number of generations.
        #[arg(short = 'n', long, default_value_t = 1)]
        generations: usize,

        /// Write the result here instead of back to FILE.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play a board in the terminal.
    Run {
        file: PathBuf,

        /// Stop after this many generations.
        #[arg(short = 'n', long)]
        generations: Option<u64>,

        /// Generations per second; 0 runs unpaced (defaults to config fps).
        #[arg(long)]
        fps: Option<f64>,

        #[arg(short, long, default_value_t = 0)]
        x: usize,

        #[arg(short, long, default_value_t = 0)]
        y: usize,

        #[arg(long)]
        width: Option<usize>,

        #[arg(long)]
        height: Option<usize>,

        /// Stop after the first generation that changes nothing.
        #[arg(long)]
        until_stable: bool,

        /// Save the final board back to FILE.
        #[arg(long)]
        save: bool,

        /// Draw with ASCII glyphs instead of colour.
        #[arg(long)]
        plain: bool,
    },

    /// Show board size and per-state cell counts.
    Info { file: PathBuf },

    /// List the paintable states and their colours.
    Palette {
        /// Omit colour swatches.
        #[arg(long)]
        plain: bool,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    // Frames and reports own stdout
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::New {
            file,
            empty,
            width,
            height,
            force,
        } => {
            let options = NewOptions {
                empty,
                width,
                height,
                force,
            };
            commands::new::execute(&config, &file, &options)?;
        }

        Commands::Show {
            file,
            x,
            y,
            width,
            height,
            pad,
            plain,
            json,
        } => {
            let options = ShowOptions {
                x,
                y,
                width,
                height,
                pad,
                plain,
                json,
            };
            commands::show::execute(&config, &file, &options)?;
        }

        Commands::Set { file, x, y, state } => edit::set(&file, x, y, state)?,
        Commands::Erase { file, x, y } => edit::erase(&file, x, y)?,
        Commands::Cycle { file, x, y } => edit::cycle(&file, x, y)?,

        Commands::Extend {
            file,
            left,
            right,
            top,
            bottom,
            x,
            y,
        } => {
            let options = ExtendOptions {
                left,
                right,
                top,
                bottom,
                view_x: x,
                view_y: y,
            };
            commands::extend::execute(&file, &options)?;
        }

        Commands::Step {
            file,
            generations,
            output,
        } => {
            commands::step::execute(&file, generations, output.as_deref())?;
        }

        Commands::Run {
            file,
            generations,
            fps,
            x,
            y,
            width,
            height,
            until_stable,
            save,
            plain,
        } => {
            let options = RunOptions {
                generations,
                fps,
                x,
                y,
                width,
                height,
                until_stable,
                save,
                plain,
            };
            commands::run::execute(&config, &file, &options).await?;
        }

        Commands::Info { file } => commands::info::execute(&file)?,

        Commands::Palette { plain } => {
            commands::palette::execute(RenderStyle::select(plain, config.color))?;
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => {
                config_cmd::show(&config)?;
            }
            ConfigCommands::Set { key, value } => {
                let mut stored = Config::load_file()?;
                config_cmd::set(&mut stored, &key, &value)?;
            }
            ConfigCommands::Get { key } => {
                config_cmd::get(&config, &key)?;
            }
            ConfigCommands::Reset => {
                config_cmd::reset()?;
            }
            ConfigCommands::Path => {
                if let Some(path) = Config::config_file_path() {
                    println!("{}", path.display());
                } else {
                    println!("(no config file path available)");
                }
            }
        },
    }

    Ok(())
}
