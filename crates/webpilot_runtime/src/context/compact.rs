//! Media stripping: drop images and structured payloads from every turn
//! before the latest exchange.

use webpilot_constant::prompts::MEDIA_REMOVED;
use webpilot_core::{ContentItem, ToolResultContent, Transcript, Turn};

/// Strips media from all turns before the last user turn and returns how many
/// items or parts were removed. The final turn is always left intact, and no
/// turn is left empty.
pub fn strip_media(transcript: &mut Transcript) -> usize {
    let Some(last) = transcript.len().checked_sub(1) else {
        return 0;
    };
    let boundary = transcript.last_user_index().unwrap_or(last).min(last);

    transcript.turns_mut()[..boundary]
        .iter_mut()
        .map(strip_turn)
        .sum()
}

fn strip_turn(turn: &mut Turn) -> usize {
    let mut removed = 0;

    turn.content.retain_mut(|item| match item {
        ContentItem::Image { .. } => {
            removed += 1;
            false
        }
        ContentItem::ToolResult { tool_result } => {
            let before = tool_result.content.len();
            tool_result.content.retain(|part| !part.is_media());
            let dropped = before - tool_result.content.len();
            if dropped > 0 && tool_result.content.is_empty() {
                tool_result
                    .content
                    .push(ToolResultContent::text(MEDIA_REMOVED));
            }
            removed += dropped;
            true
        }
        _ => true,
    });

    if turn.content.is_empty() {
        turn.push(ContentItem::text(MEDIA_REMOVED));
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use webpilot_core::{ImageData, ToolResult, ToolUse};

    fn screenshot_exchange(id: &str) -> (Turn, Turn) {
        let assistant = Turn::assistant().with_item(ContentItem::tool_use(ToolUse::new(
            id,
            "screenshot",
            json!({}),
        )));
        let user = Turn::user()
            .with_item(ContentItem::tool_result(ToolResult::success(
                id,
                vec![
                    ToolResultContent::json(json!({"filename": "a.jpeg"})),
                    ToolResultContent::image(ImageData::jpeg(vec![1, 2, 3])),
                ],
            )))
            .with_text("Current page: Title: 'a', URL: 'b'");
        (assistant, user)
    }

    #[test]
    fn test_strips_all_but_latest_exchange() {
        let (a1, u1) = screenshot_exchange("t1");
        let (a2, u2) = screenshot_exchange("t2");
        let mut transcript =
            Transcript::from_turns(vec![Turn::user().with_text("go"), a1, u1, a2, u2]);

        let removed = strip_media(&mut transcript);
        let turns = transcript.turns();
        assert_eq!(removed, 2);

        let stripped = turns[2].tool_results().next().unwrap();
        assert_eq!(stripped.content, vec![ToolResultContent::text("media removed")]);
        assert_eq!(turns[2].text(), "Current page: Title: 'a', URL: 'b'");

        let latest = turns[4].tool_results().next().unwrap();
        assert_eq!(latest.content.len(), 2);
    }

    #[test]
    fn test_image_only_turn_gets_placeholder() {
        let mut transcript = Transcript::from_turns(vec![
            Turn::user().with_item(ContentItem::image(ImageData::jpeg(vec![9]))),
            Turn::assistant().with_text("I see it"),
            Turn::user().with_text("next"),
        ]);
        strip_media(&mut transcript);
        let turns = transcript.turns();
        assert_eq!(turns[0].content, vec![ContentItem::text("media removed")]);
        assert!(turns.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn test_final_turn_kept_even_when_assistant() {
        let mut transcript = Transcript::from_turns(vec![
            Turn::user().with_text("go"),
            Turn::assistant().with_item(ContentItem::image(ImageData::jpeg(vec![1]))),
        ]);
        assert_eq!(strip_media(&mut transcript), 0);
        assert!(matches!(transcript.turns()[1].content[0], ContentItem::Image { .. }));
    }

    #[test]
    fn test_text_results_untouched() {
        let mut transcript = Transcript::from_turns(vec![
            Turn::user().with_item(ContentItem::tool_result(ToolResult::success(
                "t0",
                vec![ToolResultContent::text("plain")],
            ))),
            Turn::user().with_text("latest"),
        ]);
        assert_eq!(strip_media(&mut transcript), 0);
        assert_eq!(
            transcript.turns()[0].tool_results().next().unwrap().content,
            vec![ToolResultContent::text("plain")]
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(strip_media(&mut Transcript::new()), 0);

        let mut one = Transcript::from_turns(vec![
            Turn::user().with_item(ContentItem::image(ImageData::jpeg(vec![1]))),
        ]);
        assert_eq!(strip_media(&mut one), 0);
    }
}
