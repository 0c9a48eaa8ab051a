use super::knowledge::{UNKNOWN_CARE_INSTRUCTIONS, UNKNOWN_TYPE_INFO};
use super::*;
use crate::plant::{HistoryEntry, Personality, PlantType};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;

/// Records the prompt and answers with a canned result
struct StubGenerator {
    answer: Result<Option<String>, String>,
    seen: Mutex<Vec<ChatPrompt>>,
}

impl StubGenerator {
    fn answering(answer: Result<Option<&str>, &str>) -> Self {
        Self {
            answer: answer
                .map(|o| o.map(str::to_string))
                .map_err(str::to_string),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn complete(&self, prompt: &ChatPrompt) -> anyhow::Result<Option<String>> {
        self.seen.lock().unwrap().push(prompt.clone());
        self.answer.clone().map_err(|e| anyhow!(e))
    }
}

fn tropical_plant() -> Plant {
    let mut plant = Plant::new("Monty", Some(PlantType::Tropical));
    plant.moisture = Some(50.0);
    plant.light = Some(15_000.0);
    plant
}

// ── prompt ──────────────────────────────────────────────────────────────────

#[test]
fn test_prompt_keeps_raw_reading_precision() {
    let mut plant = tropical_plant();
    plant.moisture = Some(62.37);
    plant.light = Some(11_250.5);

    let prompt = build_chat_prompt(&plant, "hi");

    assert!(prompt.system.contains("- Moisture level: 62.37% (ideal range: 60-80%)"));
    assert!(prompt.system.contains("- Light level: 11250.5 lux (ideal range: 10000-20000 lux)"));
}

#[test]
fn test_prompt_embeds_identity_readings_and_ranges() {
    let prompt = build_chat_prompt(&tropical_plant(), "  How are you?  ");

    assert!(prompt.system.starts_with(
        "You are Monty, a tropical plant with a warm, cheerful, and loves attention personality."
    ));
    assert!(prompt.system.contains("- Moisture level: 50% (ideal range: 60-80%)"));
    assert!(prompt.system.contains("- Light level: 15000 lux (ideal range: 10000-20000 lux)"));
    assert!(prompt
        .system
        .contains("- Current status: You are thirsty and happy with lighting"));
    assert!(prompt.system.contains("PLANT TYPE KNOWLEDGE (TROPICAL):"));
    assert!(prompt.system.contains("Common varieties: Monstera"));
    assert!(prompt.system.contains("- Voice: enthusiastic and friendly"));
    assert!(prompt.system.contains("- If moisture is below 60%, express thirst"));
    assert!(prompt.system.contains("Keep responses under 100 words"));
    assert_eq!(prompt.user, "How are you?");
}

#[test]
fn test_prompt_omits_trend_line_without_history() {
    let prompt = build_chat_prompt(&tropical_plant(), "hi");
    assert!(!prompt.system.contains("Recent trend"));
}

#[test]
fn test_prompt_includes_trend_line() {
    let mut plant = tropical_plant();
    let start = Utc::now() - Duration::hours(5);
    plant.history = (0..10)
        .map(|i| HistoryEntry {
            timestamp: start + Duration::minutes(i * 30),
            moisture: if i < 5 { 80.0 } else { 50.0 },
            light: 15_000.0,
            status: String::new(),
        })
        .collect();

    let prompt = build_chat_prompt(&plant, "hi");
    assert!(prompt
        .system
        .contains("- Recent trend: moisture has been decreasing"));
}

#[test]
fn test_prompt_includes_chosen_temperament() {
    let mut plant = tropical_plant();
    plant.personality = Some(Personality::Sassy);
    let prompt = build_chat_prompt(&plant, "hi");
    assert!(prompt.system.contains("- Temperament: sassy"));
}

#[test]
fn test_prompt_unknown_type_uses_fallbacks() {
    let mut plant = Plant::new("Mystery", None);
    plant.moisture = Some(40.0);
    plant.light = Some(9_000.0);

    let prompt = build_chat_prompt(&plant, "Who are you?");

    assert!(prompt.system.contains(UNKNOWN_TYPE_INFO));
    assert!(prompt.system.contains(UNKNOWN_CARE_INSTRUCTIONS));
    assert!(prompt.system.contains("PLANT TYPE KNOWLEDGE (UNKNOWN):"));
    assert!(prompt
        .system
        .starts_with("You are Mystery, a plant of unknown type with an unknown personality."));
    assert!(prompt.system.contains("(ideal range: unknown)"));
    assert!(!prompt.system.contains("express thirst"));
}

#[test]
fn test_prompt_missing_readings() {
    let plant = Plant::new("Sprout", Some(PlantType::Herb));
    let prompt = build_chat_prompt(&plant, "hi");
    assert!(prompt.system.contains("- Moisture level: no reading yet"));
    assert!(prompt.system.contains("- Light level: no reading yet"));
}

// ── reply ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_reply_returns_generated_text() {
    let generator = StubGenerator::answering(Ok(Some("  I could use a drink! 💧 ")));
    let result = reply(&generator, &tropical_plant(), "hi", &TrendConfig::default()).await;

    assert_eq!(result.text, "I could use a drink! 💧");
    assert!(!result.fallback);

    let seen = generator.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].user, "hi");
}

#[tokio::test]
async fn test_reply_without_content_is_speechless() {
    for answer in [Ok(None), Ok(Some("   "))] {
        let generator = StubGenerator::answering(answer);
        let result = reply(&generator, &tropical_plant(), "hi", &TrendConfig::default()).await;
        assert_eq!(result.text, SPEECHLESS_REPLY);
        assert!(result.fallback);
    }
}

#[tokio::test]
async fn test_reply_collaborator_error_is_not_propagated() {
    let generator = StubGenerator::answering(Err("connection refused"));
    let result = reply(&generator, &tropical_plant(), "hi", &TrendConfig::default()).await;
    assert_eq!(result.text, UNAVAILABLE_REPLY);
    assert!(result.fallback);
}

#[test]
fn test_greeting() {
    assert_eq!(
        greeting(&tropical_plant()),
        "Hi there! I'm Monty. How are you doing today? 🌱"
    );
}
