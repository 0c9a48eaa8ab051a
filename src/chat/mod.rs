// Chat persona: prompt construction and the text-generation collaborator

mod client;
pub mod knowledge;
mod prompt;

pub use client::{OpenAiClient, TextGenerator};
pub use prompt::{build_chat_prompt, build_chat_prompt_with, ChatPrompt};

use crate::evaluator::TrendConfig;
use crate::plant::Plant;
use serde::Serialize;
use tracing::{debug, warn};

/// Reply used when the collaborator answers with nothing
pub const SPEECHLESS_REPLY: &str = "I'm feeling a bit speechless right now! 🌱";

/// Reply used when the collaborator fails
pub const UNAVAILABLE_REPLY: &str =
    "I'm having trouble finding my words right now. Try me again in a moment! 🍃";

/// Text shown to the user, plus whether it is a stand-in
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub fallback: bool,
}

impl ChatReply {
    fn generated(text: String) -> Self {
        Self {
            text,
            fallback: false,
        }
    }

    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fallback: true,
        }
    }
}

/// Ask the collaborator to answer `message` in the plant's voice.
///
/// Collaborator failures never surface to the caller; they are logged and
/// replaced with a fixed reply.
pub async fn reply(
    generator: &dyn TextGenerator,
    plant: &Plant,
    message: &str,
    trend_config: &TrendConfig,
) -> ChatReply {
    let prompt = build_chat_prompt_with(plant, message, trend_config);
    debug!(plant_id = %plant.id, prompt_len = prompt.system.len(), "Requesting chat reply");

    match generator.complete(&prompt).await {
        Ok(Some(text)) if !text.trim().is_empty() => ChatReply::generated(text.trim().to_string()),
        Ok(_) => {
            warn!(plant_id = %plant.id, "Chat collaborator returned no content");
            ChatReply::fallback(SPEECHLESS_REPLY)
        }
        Err(e) => {
            warn!(plant_id = %plant.id, error = %e, "Chat collaborator failed");
            ChatReply::fallback(UNAVAILABLE_REPLY)
        }
    }
}

/// Opening line of a conversation
pub fn greeting(plant: &Plant) -> String {
    format!("Hi there! I'm {}. How are you doing today? 🌱", plant.name)
}

#[cfg(test)]
mod tests;
