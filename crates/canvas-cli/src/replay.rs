//! Replay a recorded delta stream through a session

use anyhow::Context;
use canvas_artifact::{Artifact, Delta, Metadata};
use canvas_session::{ChatSession, DocumentRepository, InMemoryDocumentRepository, SessionConfig};
use serde::Serialize;
use std::fmt;
use std::io::BufRead;
use std::sync::Arc;

/// Parse one delta per line, skipping blank lines
///
/// # Errors
///
/// Fails on the first unreadable or malformed line, naming its 1-based
/// line number.
pub fn read_deltas<R: BufRead>(reader: R) -> anyhow::Result<Vec<Delta>> {
    let mut deltas = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("line {number}: read failed"))?;
        if line.trim().is_empty() {
            continue;
        }
        let delta = serde_json::from_str::<Delta>(&line)
            .with_context(|| format!("line {number}: malformed delta"))?;
        deltas.push(delta);
    }
    Ok(deltas)
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Deltas folded
    pub deltas: usize,
    /// Hook failures
    pub hook_failures: usize,
    /// Documents saved
    pub saved: usize,
    /// Final artifact
    pub artifact: Option<Artifact>,
    /// Final metadata
    pub metadata: Metadata,
}

/// Push `deltas` through a fresh session and pump once
///
/// # Errors
///
/// Fails if the session cannot be built or a save fails.
pub async fn replay(config: SessionConfig, deltas: Vec<Delta>) -> anyhow::Result<ReplayReport> {
    let repository: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());
    let mut session = ChatSession::new(config, repository).context("session setup failed")?;
    tracing::info!(session = %session.id(), deltas = deltas.len(), "Replaying");

    for delta in deltas {
        session.push(delta);
    }
    let outcome = session.pump().await.context("replay failed")?;

    let report = ReplayReport {
        deltas: outcome.processed,
        hook_failures: outcome.hook_failures,
        saved: outcome.saved,
        artifact: session.artifact(),
        metadata: session.store().metadata(),
    };
    let _ = session.end();
    Ok(report)
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deltas: {}", self.deltas)?;
        writeln!(f, "Hook failures: {}", self.hook_failures)?;
        writeln!(f, "Saved documents: {}", self.saved)?;
        match &self.artifact {
            None => writeln!(f, "Artifact: none"),
            Some(artifact) => {
                writeln!(f, "Artifact:")?;
                writeln!(
                    f,
                    "  Document: {}",
                    artifact.document_id.as_deref().unwrap_or("-")
                )?;
                writeln!(f, "  Title: {}", artifact.title)?;
                writeln!(f, "  Kind: {}", artifact.kind)?;
                writeln!(f, "  Status: {:?}", artifact.status)?;
                writeln!(f, "  Visible: {}", artifact.is_visible)?;
                writeln!(f, "  Content: {} chars", artifact.content.chars().count())
            }
        }
    }
}
