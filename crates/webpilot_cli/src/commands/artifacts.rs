//! `webpilot artifacts` subcommands.

use anyhow::Result;
use webpilot_core::SessionId;
use webpilot_toolbus::{ArtifactStore, SessionLayout};

use crate::cli::ArtifactsAction;
use crate::commands::resolve_workdir;
use crate::output;

pub async fn handle(action: ArtifactsAction) -> Result<()> {
    match action {
        ArtifactsAction::List { session, workdir } => {
            let layout = SessionLayout::new(resolve_workdir(workdir)?, SessionId::from(session));
            list(&ArtifactStore::new(layout)).await
        }
        ArtifactsAction::Read { uri, workdir } => {
            // Reads resolve any session's uri; the layout session is unused.
            let layout = SessionLayout::new(resolve_workdir(workdir)?, SessionId::new());
            read(&ArtifactStore::new(layout), &uri).await
        }
    }
}

async fn list(store: &ArtifactStore) -> Result<()> {
    let names = store.list().await?;

    if names.is_empty() {
        output::dim("No artifacts found for this session");
        return Ok(());
    }

    output::header("Artifacts");

    let mut table = output::table();
    output::table_header(&mut table, "URI", "Filename");

    let uris: Vec<String> = names
        .iter()
        .map(|name| store.uri_for(name).to_string())
        .collect();
    let items: Vec<_> = names
        .iter()
        .zip(&uris)
        .map(|(name, uri)| {
            output::table_row(&mut table, uri, name);
            (uri.as_str(), name.as_str())
        })
        .collect();

    output::table_print(&table, &items);

    Ok(())
}

async fn read(store: &ArtifactStore, uri: &str) -> Result<()> {
    let contents = store.read(uri).await?;
    output::text(&contents.mime_type, &contents.text);
    Ok(())
}
