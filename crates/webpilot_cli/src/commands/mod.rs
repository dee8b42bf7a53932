//! Command dispatch.

pub mod artifacts;
pub mod run;
pub mod serve;
pub mod tools;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            prompt,
            model,
            summary_model,
            workdir,
            max_turns,
            max_tokens,
            no_stream,
            headed,
            host_config,
            server,
            ask_timeout,
            no_download,
        } => {
            let args = run::RunArgs {
                prompt,
                model,
                summary_model,
                workdir,
                max_turns,
                max_tokens,
                stream: !no_stream,
                headed,
                host_config,
                server,
                ask_timeout,
                download: !no_download,
            };
            run::handle(args).await
        }
        Command::Serve {
            workdir,
            session,
            headed,
        } => serve::handle(workdir, session, headed).await,
        Command::Tools { action } => tools::handle(action).await,
        Command::Artifacts { action } => artifacts::handle(action).await,
    }
}

/// `--workdir` or the current directory.
pub(crate) fn resolve_workdir(workdir: Option<PathBuf>) -> Result<PathBuf> {
    match workdir {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir()?),
    }
}
