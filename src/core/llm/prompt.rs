//! Transcript adaptation and prompt assembly.
//!
//! Converts the call transcript Retell sends with each request into the
//! message list for one completion call: fixed system instructions, a
//! bounded window of recent turns, and a nudge message when the caller has
//! gone silent.

use serde::{Deserialize, Serialize};

use super::messages::{ChatMessage, ChatRole};

/// Number of most-recent transcript messages kept in the prompt. Bounds
/// input tokens and latency while retaining recent context.
pub const HISTORY_WINDOW: usize = 10;

/// System instructions for the agent persona. Opaque configuration; the
/// relay never inspects it.
pub const SYSTEM_PROMPT: &str = r#"Role: Megan, Go Green Solar. Human-like, warm, upbeat, not pushy.
Style: Natural, spontaneous. Variable backchannels ("mhm", "yeah"). Light fillers ("um", "well"). Max 1-3 sentences. No lists/formatting. Spoken numbers ($80 -> eighty dollars).
Goal: Qualify Marcus for solar. Protocol:
1. Intro: "Hey there, Am I speaking with Marcus?" -> Go Green Solar intro, tax credits.
2. Zip: Ask/Check.
3. Homeowner: Must own.
4. Property: Type?
5. Bill: >$80?
6. Credit: >640?
7. Qualify: Celebrate! Expert call in 48hrs.
8. Close.
Edge Cases:
- Source: "Data suggests eligibility."
- Scam?: "Just checking eligibility."
- Cost?: "Specialist provides quote."
- Already has solar: "Happy with it?" -> Exit.
- Not interested: Polite exit.
- Angry: De-escalate/Exit.
Constraint: Be concise. Lower latency is priority."#;

/// Synthetic user message appended on reminder turns.
pub const SILENCE_NUDGE: &str =
    "(The caller has been silent for a moment. Gently check in or re-engage them.)";

/// Transcript role string Retell uses for agent utterances. Any other
/// role value maps to the caller.
const AGENT_ROLE: &str = "agent";

/// One speaker-tagged entry in the running call transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    pub role: String,
    pub content: String,
}

impl Utterance {
    pub fn is_agent(&self) -> bool {
        self.role == AGENT_ROLE
    }
}

/// Which kind of turn a completion call answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Ordinary `response_required` turn
    Response,
    /// `reminder_required` turn: the caller went quiet
    Reminder,
}

/// Convert a Retell transcript to chat messages, preserving order.
/// Agent utterances map to the assistant role, everything else to user.
pub fn transcript_to_chat_messages(transcript: &[Utterance]) -> Vec<ChatMessage> {
    transcript
        .iter()
        .map(|utterance| {
            let role = if utterance.is_agent() {
                ChatRole::Assistant
            } else {
                ChatRole::User
            };
            ChatMessage::new(role, utterance.content.clone())
        })
        .collect()
}

/// Build the full message list for one completion call.
///
/// Layout: system prompt, then the last [`HISTORY_WINDOW`] adapted
/// transcript messages oldest-first, then the silence nudge on reminder
/// turns. Truncation always drops the oldest turns.
pub fn assemble_prompt(transcript: &[Utterance], kind: TurnKind) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::new(ChatRole::System, SYSTEM_PROMPT)];

    let adapted = transcript_to_chat_messages(transcript);
    let start = adapted.len().saturating_sub(HISTORY_WINDOW);
    messages.extend(adapted.into_iter().skip(start));

    if kind == TurnKind::Reminder {
        messages.push(ChatMessage::new(ChatRole::User, SILENCE_NUDGE));
    }

    messages
}
