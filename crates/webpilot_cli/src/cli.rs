//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// LLM tool-use loop that drives a web browser
#[derive(Parser)]
#[command(name = "webpilot", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a browsing session
    Run {
        /// Task for the model. Uses the built-in demo task if not set.
        prompt: Option<String>,
        /// Model driving the browser. Uses WEBPILOT_MODEL env if not set.
        #[arg(long)]
        model: Option<String>,
        /// Model used for transcript summaries. Uses WEBPILOT_SUMMARY_MODEL env if not set.
        #[arg(long)]
        summary_model: Option<String>,
        /// Working directory for screenshots, artifacts and downloads (default: current directory)
        #[arg(long)]
        workdir: Option<PathBuf>,
        /// Stop after this many model calls
        #[arg(long)]
        max_turns: Option<u32>,
        /// Maximum tokens per model response
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Wait for whole responses instead of streaming text
        #[arg(long)]
        no_stream: bool,
        /// Show the browser window
        #[arg(long)]
        headed: bool,
        /// TOML file describing out-of-process effector servers
        #[arg(long)]
        host_config: Option<PathBuf>,
        /// Server id in --host-config (default: the first configured server)
        #[arg(long, requires = "host_config")]
        server: Option<String>,
        /// Seconds to wait for an ask_user answer (default: forever)
        #[arg(long)]
        ask_timeout: Option<u64>,
        /// Leave artifacts on the host when the session ends
        #[arg(long)]
        no_download: bool,
    },
    /// Serve the browser effectors over MCP on stdin/stdout
    Serve {
        /// Root of the screenshot and artifact directories (default: current directory)
        #[arg(long)]
        workdir: Option<PathBuf>,
        /// Session id that namespaces artifacts (default: a fresh uuid)
        #[arg(long)]
        session: Option<String>,
        /// Show the browser window
        #[arg(long)]
        headed: bool,
    },
    /// Inspect and call browser effectors
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },
    /// List and read files written by write_file
    Artifacts {
        #[command(subcommand)]
        action: ArtifactsAction,
    },
}

#[derive(Subcommand)]
pub enum ToolsAction {
    /// List all effectors
    List,
    /// Show an effector's description and input schema
    Info {
        /// Effector name
        tool: String,
    },
    /// Call an effector against a fresh browser
    Call {
        /// Effector name
        tool: String,
        /// JSON arguments
        #[arg(default_value = "{}")]
        args: String,
        /// Show the browser window
        #[arg(long)]
        headed: bool,
        /// Working directory (default: current directory)
        #[arg(long)]
        workdir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ArtifactsAction {
    /// List one session's artifacts
    List {
        /// Session id
        session: String,
        /// Working directory (default: current directory)
        #[arg(long)]
        workdir: Option<PathBuf>,
    },
    /// Print an artifact by uri (artifact://{session}/{filename})
    Read {
        uri: String,
        /// Working directory (default: current directory)
        #[arg(long)]
        workdir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_parse() {
        let cli = Cli::try_parse_from([
            "webpilot",
            "run",
            "find the docs",
            "--max-turns",
            "5",
            "--no-stream",
            "--ask-timeout",
            "30",
        ])
        .unwrap();

        match cli.command {
            Command::Run {
                prompt,
                max_turns,
                no_stream,
                ask_timeout,
                headed,
                ..
            } => {
                assert_eq!(prompt.as_deref(), Some("find the docs"));
                assert_eq!(max_turns, Some(5));
                assert!(no_stream);
                assert!(!headed);
                assert_eq!(ask_timeout, Some(30));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_server_requires_host_config() {
        assert!(Cli::try_parse_from(["webpilot", "run", "--server", "browser"]).is_err());
    }

    #[test]
    fn test_tools_call_defaults_to_empty_args() {
        let cli = Cli::try_parse_from(["webpilot", "tools", "call", "screenshot"]).unwrap();
        match cli.command {
            Command::Tools {
                action: ToolsAction::Call { tool, args, .. },
            } => {
                assert_eq!(tool, "screenshot");
                assert_eq!(args, "{}");
            }
            _ => panic!("expected tools call"),
        }
    }
}
