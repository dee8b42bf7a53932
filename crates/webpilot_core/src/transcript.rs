//! The ordered conversation history of one session.

use serde::{Deserialize, Serialize};

use crate::turn::{ContentItem, Role, Turn};

/// Append-only sequence of turns. Only compaction may rewrite it wholesale,
/// through [`Transcript::replace`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript holding one user turn with the initial prompt.
    pub fn seeded(initial_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::user().with_item(ContentItem::text(initial_prompt))],
        }
    }

    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn replace(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// In-place access for media stripping.
    pub fn turns_mut(&mut self) -> &mut [Turn] {
        &mut self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Index of the most recent user turn.
    pub fn last_user_index(&self) -> Option<usize> {
        self.turns.iter().rposition(|turn| turn.role == Role::User)
    }

    pub fn tool_use_count(&self) -> usize {
        self.turns.iter().map(|turn| turn.tool_uses().count()).sum()
    }

    pub fn tool_result_count(&self) -> usize {
        self.turns.iter().map(|turn| turn.tool_results().count()).sum()
    }

    pub fn tool_counts_balanced(&self) -> bool {
        self.tool_use_count() == self.tool_result_count()
    }

    /// Ids of tool uses whose following turn does not answer them.
    ///
    /// A tool use in the final turn is pending, not unanswered, and is skipped.
    pub fn unanswered_tool_uses(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for (index, turn) in self.turns.iter().enumerate() {
            let Some(next) = self.turns.get(index + 1) else {
                break;
            };
            for tool_use in turn.tool_uses() {
                let answered = next
                    .tool_results()
                    .filter(|result| result.tool_use_id == tool_use.id)
                    .count();
                if answered != 1 {
                    missing.push(tool_use.id.clone());
                }
            }
        }
        missing
    }
}
