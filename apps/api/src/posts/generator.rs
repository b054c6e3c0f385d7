//! Post generation: runs one completion task per requested output.
//!
//! Flow per submission: for each requested output (in selection order) →
//! build prompt → one completion call → ok or error result.
//!
//! A failed call is terminal for that post only. Results always come back in
//! selection order, whether tasks run one at a time or `concurrency` at once.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::llm_client::CompletionClient;
use crate::posts::form::{RequestedOutput, Submission};
use crate::posts::prompt_builder::{build_prompt, build_prompt_for_label};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PostOutcome {
    Ok { text: String },
    Error { error: String },
}

/// The result for one requested output, as displayed under its heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostResult {
    pub kind: String,
    pub heading: String,
    #[serde(flatten)]
    pub outcome: PostOutcome,
}

impl PostResult {
    fn new(kind: &str, outcome: PostOutcome) -> Self {
        Self {
            kind: kind.to_string(),
            heading: format!("{kind} Post"),
            outcome,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, PostOutcome::Ok { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub submission_id: Uuid,
    pub results: Vec<PostResult>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates every requested post for a submission.
///
/// `concurrency` caps the completion calls in flight; 1 reproduces the
/// one-after-another behavior. Zero requested outputs means zero calls.
pub async fn generate_posts(
    client: &dyn CompletionClient,
    submission: &Submission,
    concurrency: usize,
) -> GenerateResponse {
    let submission_id = Uuid::new_v4();
    info!(
        "Submission {}: generating {} post(s) for '{}' with model {} (concurrency {})",
        submission_id,
        submission.outputs.len(),
        submission.event.name,
        client.model(),
        concurrency
    );

    // Collected up front so the handler future stays Send (rust-lang/rust#64552)
    let tasks: Vec<_> = submission
        .outputs
        .iter()
        .map(|output| generate_one(client, submission, output, submission_id))
        .collect();

    let results: Vec<PostResult> = stream::iter(tasks)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    info!(
        "Submission {}: {} post(s) generated, {} failed",
        submission_id,
        results.len() - failed,
        failed
    );

    GenerateResponse {
        submission_id,
        results,
    }
}

async fn generate_one(
    client: &dyn CompletionClient,
    submission: &Submission,
    output: &RequestedOutput,
    submission_id: Uuid,
) -> PostResult {
    let kind = output.label();
    let prompt = match output {
        RequestedOutput::Known(request) => build_prompt(&submission.event, request),
        RequestedOutput::Unrecognized(label) => {
            build_prompt_for_label(&submission.event, label, None)
        }
    };

    match client.complete(&prompt).await {
        Ok(text) => {
            info!("Submission {}: {} post generated", submission_id, kind);
            PostResult::new(kind, PostOutcome::Ok { text })
        }
        Err(e) => {
            warn!("Submission {}: {} post failed: {}", submission_id, kind, e);
            PostResult::new(
                kind,
                PostOutcome::Error {
                    error: format!("Error generating {kind} post: {e}"),
                },
            )
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
