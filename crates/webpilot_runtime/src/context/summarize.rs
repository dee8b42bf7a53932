//! Transcript summarization.
//!
//! ```text
//! [first] [ ...middle... ] [tail: last K assistant->user pairs]
//!    │            │                      │
//!    │     summarized by the model       │
//!    ▼            ▼                      ▼
//! [first] [assistant: "[CONVERSATION SUMMARY: ...]" + carried tool uses] [tail]
//! ```
//!
//! Tool uses at the end of the middle span are answered by the first tail
//! turn, so they are carried into the summary turn verbatim.

use tracing::{debug, warn};
use webpilot_constant::prompts::SUMMARY_INSTRUCTIONS;
use webpilot_core::{ContentItem, Role, Turn};
use webpilot_llms::Provider;
use webpilot_llms::types::{GenerateOptions, GenerateRequest, Message, Role as LlmRole};

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Summarized(Vec<Turn>),
    /// Too short to summarize; nothing was attempted.
    NotNeeded,
    /// Attempted and abandoned. The caller keeps its transcript.
    Failed(String),
}

/// How a transcript splits around the summary.
#[derive(Debug, PartialEq)]
pub(crate) struct SummaryPlan<'a> {
    pub first: &'a Turn,
    pub middle: &'a [Turn],
    pub tail: &'a [Turn],
}

/// None when there is nothing to fold, or when `keep_last` is zero: the
/// summary must never be the final turn.
pub(crate) fn plan(turns: &[Turn], keep_last: usize) -> Option<SummaryPlan<'_>> {
    if keep_last == 0 || turns.len() <= keep_last * 2 + 1 {
        return None;
    }

    // Walk back until K user turns directly preceded by an assistant turn are collected.
    let mut tail_start = turns.len();
    let mut pairs = 0;
    for i in (0..turns.len()).rev() {
        tail_start = i;
        if turns[i].role == Role::User && i > 0 && turns[i - 1].role == Role::Assistant {
            pairs += 1;
        }
        if pairs >= keep_last {
            break;
        }
    }

    let tail_start = tail_start.max(1);
    let middle = &turns[1..tail_start];
    if middle.is_empty() {
        return None;
    }

    Some(SummaryPlan {
        first: &turns[0],
        middle,
        tail: &turns[tail_start..],
    })
}

/// Role-tagged text of the span, with markers in place of non-text content.
pub(crate) fn render(turns: &[Turn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let mut line = String::new();
        for item in &turn.content {
            match item {
                ContentItem::Text { text } => line.push_str(text),
                ContentItem::Image { .. } => line.push_str("[IMAGE]"),
                ContentItem::ToolUse { tool_use } => {
                    line.push_str(&format!("[TOOL USE: {}]", tool_use.name))
                }
                ContentItem::ToolResult { tool_result } => {
                    line.push_str("[TOOL RESULT]");
                    if tool_result.content.iter().any(|c| c.is_media()) {
                        line.push_str(" [JSON data]");
                    }
                }
                ContentItem::Resource { resource } => {
                    line.push_str(&format!("[RESOURCE: {}]", resource.uri))
                }
            }
            line.push(' ');
        }
        if !line.trim().is_empty() {
            out.push_str(&format!("{}: {}\n\n", turn.role.as_str().to_uppercase(), line));
        }
    }
    out
}

/// Reassembles the transcript around `summary`, or None when the tool
/// use/result counts would no longer match.
pub(crate) fn assemble(plan: &SummaryPlan<'_>, summary: &str) -> Option<Vec<Turn>> {
    let mut summary_turn = Turn::assistant().with_text(format!("[CONVERSATION SUMMARY: {}]", summary));

    if let Some(last) = plan.middle.last()
        && last.role == Role::Assistant
    {
        for tool_use in last.tool_uses() {
            summary_turn.push(ContentItem::tool_use(tool_use.clone()));
        }
    }

    let mut turns = Vec::with_capacity(plan.tail.len() + 2);
    turns.push(plan.first.clone());
    turns.push(summary_turn);
    turns.extend(plan.tail.iter().cloned());

    let uses: usize = turns.iter().map(|t| t.tool_uses().count()).sum();
    let results: usize = turns.iter().map(|t| t.tool_results().count()).sum();
    if uses != results {
        warn!(uses, results, "Tool use/result mismatch after summarization");
        return None;
    }
    Some(turns)
}

/// Summarizes the middle of `turns` with one model call.
pub async fn summarize(
    turns: &[Turn],
    keep_last: usize,
    provider: &dyn Provider,
    model: &str,
    max_tokens: u32,
) -> SummaryOutcome {
    let Some(plan) = plan(turns, keep_last) else {
        debug!(turns = turns.len(), keep_last, "Not enough turns to summarize");
        return SummaryOutcome::NotNeeded;
    };

    let prompt = format!("{}{}", SUMMARY_INSTRUCTIONS, render(plan.middle));
    let request = GenerateRequest::new(model, vec![Message::new(LlmRole::User, prompt)])
        .with_options(GenerateOptions::new().max_tokens(max_tokens));

    let summary = match provider.generate(request).await {
        Ok(response) => response.text(),
        Err(e) => {
            warn!(error = %e, "Summarization call failed");
            return SummaryOutcome::Failed(format!("summarization call failed: {}", e));
        }
    };

    debug!(
        middle = plan.middle.len(),
        kept = plan.tail.len(),
        chars = summary.len(),
        "Summarized transcript"
    );

    match assemble(&plan, &summary) {
        Some(turns) => SummaryOutcome::Summarized(turns),
        None => SummaryOutcome::Failed("tool use/result count mismatch".to_string()),
    }
}
