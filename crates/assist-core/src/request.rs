//! Request payload assembly.

use crate::api_types::{Content, GenerateContentRequest};
use crate::role::to_external_role;
use crate::turn::Turn;

/// How a request relates to prior conversation.
#[derive(Debug, Clone, Copy)]
pub enum RequestMode<'a> {
    /// Multi-turn chat: the full prior conversation is sent ahead of the new input.
    Conversational { history: &'a [Turn] },
    /// Stateless one-off request (suggestions). No history is sent.
    SingleShot,
}

/// Build the payload for `new_input` under the given mode.
///
/// History is copied in order with no trimming or deduplication. Empty
/// input is not rejected here; callers decide whether to send it.
pub fn build_request(mode: RequestMode<'_>, new_input: &str) -> GenerateContentRequest {
    let mut contents = match mode {
        RequestMode::Conversational { history } => {
            let mut contents = Vec::with_capacity(history.len() + 1);
            contents.extend(
                history
                    .iter()
                    .map(|turn| Content::text(to_external_role(turn.role()), turn.text())),
            );
            contents
        }
        RequestMode::SingleShot => Vec::with_capacity(1),
    };

    // Current user message
    contents.push(Content::user(new_input));

    GenerateContentRequest { contents }
}
