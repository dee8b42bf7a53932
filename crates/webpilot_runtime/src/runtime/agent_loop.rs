//! The browsing loop: model call, effector dispatch, compaction.

use std::time::Instant;

use tracing::{Instrument, info, warn};
use webpilot_constant::app;
use webpilot_core::{Role, SessionEvent, SessionStatus, StopCondition, ToolUse, Transcript};
use webpilot_observability::{record_duration, record_error, session_span};

use crate::artifacts::download_artifacts;
use crate::context::{self, SummaryOutcome};
use crate::error::RuntimeError;

use super::Runtime;

impl Runtime {
    /// Main entry point: seed the transcript with `initial_prompt` and run
    /// until the model stops asking for tools.
    ///
    /// Returns the final transcript. A model stop other than `Done` leaves the
    /// session marked failed but still returns the transcript; only transport
    /// failures to the model or the host come back as errors.
    pub async fn run_session(
        &mut self,
        initial_prompt: impl Into<String>,
    ) -> Result<Transcript, RuntimeError> {
        let span = session_span!(self.session.id.as_str(), "run_session");
        let start = Instant::now();

        let result = self.drive(initial_prompt.into()).instrument(span.clone()).await;

        span.in_scope(|| {
            record_duration("session.duration_ms", start.elapsed());
            if let Err(e) = &result {
                record_error(e);
            }
        });
        if let Err(e) = &result {
            self.session.fail(e.to_string());
            let _ = self.event_tx.send(SessionEvent::error(e.to_string())).await;
        }

        if self.config.download_artifacts && !self.session.artifacts.is_empty() {
            let downloads_dir = self.config.workdir.join(app::DOWNLOADS_DIR);
            download_artifacts(
                self.host.as_ref(),
                &self.session.artifacts,
                &downloads_dir,
                &self.event_tx,
            )
            .await;
        }

        let _ = self
            .event_tx
            .send(SessionEvent::session_end(self.session.status.clone()))
            .await;

        result.map(|()| self.session.transcript.clone())
    }

    async fn drive(&mut self, initial_prompt: String) -> Result<(), RuntimeError> {
        info!("Starting session with initial prompt: {} chars", initial_prompt.len());
        self.session.status = SessionStatus::Running;
        let _ = self
            .event_tx
            .send(SessionEvent::status("Session started"))
            .await;

        let _ = self.event_tx.send(SessionEvent::turn_start(Role::User)).await;
        self.session.transcript = Transcript::seeded(initial_prompt);

        let mut calls: u32 = 0;
        loop {
            if let Some(max) = self.config.max_turns
                && calls >= max
            {
                info!("Max turns ({}) reached", max);
                self.session.complete();
                return Ok(());
            }
            calls += 1;

            let (turn, stop, usage) = self.converse().await?;
            self.last_usage = Some(usage.clone());

            let turn = turn.without_blank_text();
            let tool_uses: Vec<ToolUse> = turn.tool_uses().cloned().collect();
            if !turn.is_empty() {
                self.session.add_turn(turn);
            }
            let _ = self
                .event_tx
                .send(SessionEvent::turn_end(stop, Some(usage)))
                .await;

            match stop {
                StopCondition::ToolPending if !tool_uses.is_empty() => {}
                StopCondition::Error => {
                    warn!("Model stopped with an error condition");
                    self.session.fail("model stopped with an error condition");
                    return Ok(());
                }
                _ => {
                    self.session.complete();
                    return Ok(());
                }
            }

            let _ = self.event_tx.send(SessionEvent::turn_start(Role::User)).await;
            let results = self.execute_tool_uses(tool_uses).await?;
            self.session.add_turn(results);

            self.compact().await;
        }
    }

    /// Strips media, then summarizes when the last call's input exceeded the
    /// threshold. Never fails; a failed summary leaves the transcript as is.
    async fn compact(&mut self) {
        if self.config.strip_media {
            let removed = context::strip_media(&mut self.session.transcript);
            if removed > 0 {
                info!(removed, "Stripped media from earlier turns");
            }
        }

        if !self.config.summarize {
            return;
        }
        let over = self
            .last_usage
            .as_ref()
            .is_some_and(|u| u.input_tokens > self.config.summary_threshold);
        if !over {
            return;
        }

        let before = self.session.transcript.len();
        let outcome = context::summarize(
            self.session.transcript.turns(),
            self.config.keep_last_turns,
            self.llm_client.as_ref(),
            &self.config.summary_model,
            self.config.max_tokens,
        )
        .await;

        match outcome {
            SummaryOutcome::Summarized(turns) => {
                let after = turns.len();
                self.session.transcript.replace(turns);
                info!(before, after, "Summarized transcript");
                let _ = self
                    .event_tx
                    .send(SessionEvent::compacted(before, after))
                    .await;
            }
            SummaryOutcome::NotNeeded => {}
            SummaryOutcome::Failed(reason) => {
                warn!(reason = %reason, "Summarization skipped");
                let _ = self
                    .event_tx
                    .send(SessionEvent::compaction_skipped(reason))
                    .await;
            }
        }
    }
}
