//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the Voxboard CLI.

use crate::agents::Agent;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("{} {}", "✓".green().bold(), message);
        } else {
            println!("[ok] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "✗".red().bold(), message);
        } else {
            eprintln!("[error] {}", message);
        }
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("{} {}", "→".cyan(), message);
        } else {
            println!("[info] {}", message);
        }
    }

    /// Print one agent's details
    pub fn agent(&self, agent: &Agent) {
        if self.colored {
            println!("{}", agent.name.bright_white().bold());
            println!("  assistant id: {}", agent.assistant_id.cyan());
            println!("  created at:   {}", agent.created_at.dimmed());
        } else {
            println!("{}", agent.name);
            println!("  assistant id: {}", agent.assistant_id);
            println!("  created at:   {}", agent.created_at);
        }
    }

    /// Print a table of agents
    pub fn agent_list(&self, agents: &[Agent]) {
        if agents.is_empty() {
            self.info("No agents registered");
            return;
        }

        for agent in agents {
            if self.colored {
                println!(
                    "{:<24} {}",
                    agent.name.bright_white().bold(),
                    agent.assistant_id.dimmed()
                );
            } else {
                println!("{:<24} {}", agent.name, agent.assistant_id);
            }
        }
    }
}
