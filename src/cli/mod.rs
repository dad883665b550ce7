//! CLI module for Voxboard
//!
//! Provides command-line interface parsing for the voxboard-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};

/// Voxboard - voice agent board
///
/// Register named voice agents and serve each one at a public URL with an
/// embedded call widget.
#[derive(Parser, Debug)]
#[command(
    name = "voxboard-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Voxboard - voice agent board",
    long_about = "Register named voice agents (a URL slug paired with an external\n\
                  voice-assistant id) and serve each one at a public URL with an\n\
                  embedded call widget.\n\n\
                  Run without arguments to start the server. Configuration comes\n\
                  from the environment (or a .env file).",
    after_help = "EXAMPLES:\n    \
                  voxboard-server                          # Start the server\n    \
                  voxboard-server serve --port 8080        # Start on another port\n    \
                  voxboard-server agent list               # List registered agents\n    \
                  voxboard-server agent add john asst-123  # Register an agent"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute (defaults to serve)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host address, overriding HOST from the environment
        #[arg(long)]
        host: Option<String>,

        /// Port, overriding PORT from the environment
        #[arg(long)]
        port: Option<u16>,
    },

    /// Manage agents directly against the configured store
    #[command(subcommand)]
    Agent(AgentCommands),
}

/// Agent management subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List all registered agents
    List,

    /// Show details for a specific agent
    Show {
        /// Name of the agent
        name: String,
    },

    /// Create or replace an agent
    Add {
        /// Name of the agent (lowercase letters, numbers, hyphens)
        name: String,

        /// External voice-assistant identifier
        assistant_id: String,
    },

    /// Delete an agent
    Remove {
        /// Name of the agent
        name: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
