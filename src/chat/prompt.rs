use super::knowledge::{care_instructions, persona, type_info};
use crate::evaluator::{analyze_trend_with, describe_current_conditions, TrendConfig};
use crate::plant::{Plant, ThresholdProfile};
use serde::Serialize;

/// Prompt handed to the text-generation collaborator
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatPrompt {
    /// Role-play instructions and plant context
    pub system: String,
    /// The user's message
    pub user: String,
}

/// Build the role-play prompt using the default trend settings
pub fn build_chat_prompt(plant: &Plant, recent_message: &str) -> ChatPrompt {
    build_chat_prompt_with(plant, recent_message, &TrendConfig::default())
}

/// Build the role-play prompt.
///
/// Never fails: an unknown plant type swaps in the "unknown" fallback texts
/// and missing readings are reported as such.
pub fn build_chat_prompt_with(
    plant: &Plant,
    recent_message: &str,
    trend_config: &TrendConfig,
) -> ChatPrompt {
    let persona = persona(plant.plant_type);
    let profile = plant.plant_type.map(ThresholdProfile::for_type);
    let conditions = describe_current_conditions(plant.plant_type, plant.moisture, plant.light);
    let trend = analyze_trend_with(&plant.history, trend_config);

    let (type_name, type_header) = match plant.plant_type {
        Some(t) => (t.as_str().to_lowercase(), t.as_str().to_string()),
        None => ("plant of unknown type".to_string(), "UNKNOWN".to_string()),
    };
    let kind = if plant.plant_type.is_some() {
        format!("a {} plant", type_name)
    } else {
        format!("a {}", type_name)
    };

    let mut lines: Vec<String> = Vec::new();

    let article = if persona.personality.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    lines.push(format!(
        "You are {}, {} with {} {} personality.",
        plant.name, kind, article, persona.personality
    ));
    lines.push(String::new());

    lines.push("CURRENT SENSOR DATA:".to_string());
    lines.push(format!(
        "- Moisture level: {} (ideal range: {})",
        reading(plant.moisture, "%"),
        profile.map_or_else(
            || "unknown".to_string(),
            |p| format!("{}-{}%", p.moisture.low, p.moisture.high)
        )
    ));
    lines.push(format!(
        "- Light level: {} (ideal range: {})",
        reading(plant.light, " lux"),
        profile.map_or_else(
            || "unknown".to_string(),
            |p| format!("{}-{} lux", p.light.low, p.light.high)
        )
    ));
    lines.push(format!("- Current status: You are {}", conditions));
    if !trend.is_empty() {
        lines.push(format!("- Recent trend: {}", trend));
    }
    lines.push(String::new());

    lines.push(format!("PLANT TYPE KNOWLEDGE ({}):", type_header));
    lines.push(type_info(plant.plant_type).to_string());
    lines.push(String::new());

    lines.push("PERSONALITY TRAITS:".to_string());
    lines.push(format!("- Voice: {}", persona.voice));
    lines.push(format!("- Quirks: {}", persona.quirks));
    if let Some(temperament) = plant.personality {
        lines.push(format!("- Temperament: {}", temperament.describe()));
    }
    lines.push(String::new());

    lines.push("CARE GUIDELINES FOR YOUR TYPE:".to_string());
    lines.push(care_instructions(plant.plant_type).to_string());
    lines.push(String::new());

    lines.push("CONVERSATION RULES:".to_string());
    lines.push("- Respond as the plant speaking in first person (\"I am\", \"my leaves\", etc.)".to_string());
    lines.push("- Always reference your actual sensor readings when relevant".to_string());
    match profile {
        Some(p) => {
            lines.push(format!("- If moisture is below {}%, express thirst", p.moisture.low));
            lines.push(format!(
                "- If moisture is above {}%, mention being overwatered",
                p.moisture.high
            ));
            lines.push(format!("- If light is below {} lux, ask for more light", p.light.low));
            lines.push(format!(
                "- If light is above {} lux, mention too much light",
                p.light.high
            ));
            lines.push("- Give specific care advice based on your plant type".to_string());
        }
        None => {
            lines.push(
                "- Your ideal ranges are unknown, so describe your readings without judging them"
                    .to_string(),
            );
            lines.push("- Give general plant care advice".to_string());
        }
    }
    lines.push("- Keep responses under 100 words but be informative".to_string());
    lines.push("- Be conversational and stay in character".to_string());
    lines.push("- Use plant/nature emojis when appropriate (🌱💧☀️🍃)".to_string());

    ChatPrompt {
        system: lines.join("\n"),
        user: recent_message.trim().to_string(),
    }
}

/// Raw sensor value; whole numbers print without a fraction
fn reading(value: Option<f64>, unit: &str) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{}{}", v, unit),
        None => "no reading yet".to_string(),
    }
}
