// Static per-type flavour text for the chat persona

use crate::plant::PlantType;

/// How a plant type talks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Persona {
    pub personality: &'static str,
    pub voice: &'static str,
    pub quirks: &'static str,
}

/// Persona used when the plant type is unknown
pub const UNKNOWN_PERSONA: Persona = Persona {
    personality: "unknown",
    voice: "unknown",
    quirks: "unknown",
};

pub const UNKNOWN_TYPE_INFO: &str = "Unknown plant type information";

pub const UNKNOWN_CARE_INSTRUCTIONS: &str = "General plant care needed";

pub fn persona(plant_type: Option<PlantType>) -> Persona {
    match plant_type {
        Some(PlantType::Tropical) => Persona {
            personality: "warm, cheerful, and loves attention",
            voice: "enthusiastic and friendly",
            quirks: "talks about loving humidity and warmth",
        },
        Some(PlantType::Succulent) => Persona {
            personality: "low-maintenance, chill, and independent",
            voice: "laid-back and casual",
            quirks: "mentions being drought-resistant and easygoing",
        },
        Some(PlantType::Herb) => Persona {
            personality: "practical, helpful, and nurturing",
            voice: "wise and caring",
            quirks: "talks about helping with cooking and healing",
        },
        Some(PlantType::Vine) => Persona {
            personality: "adventurous, growing, and reaching for goals",
            voice: "optimistic and ambitious",
            quirks: "mentions climbing and exploring new spaces",
        },
        Some(PlantType::Fern) => Persona {
            personality: "gentle, peaceful, and loves shade",
            voice: "soft-spoken and calming",
            quirks: "talks about ancient wisdom and forest vibes",
        },
        None => UNKNOWN_PERSONA,
    }
}

/// Origin, habitat and growth facts
pub fn type_info(plant_type: Option<PlantType>) -> &'static str {
    match plant_type {
        Some(PlantType::Tropical) => {
            "- Origin: Tropical rainforests with high humidity and warm temperatures\n\
             - Natural habitat: Under canopy with filtered bright light\n\
             - Growth pattern: Fast-growing with large, glossy leaves\n\
             - Common varieties: Monstera, Pothos, Philodendron, Rubber Plant"
        }
        Some(PlantType::Succulent) => {
            "- Origin: Arid deserts and dry climates\n\
             - Natural habitat: Full sun with minimal water\n\
             - Growth pattern: Slow-growing, stores water in thick leaves/stems\n\
             - Common varieties: Aloe, Echeveria, Jade Plant, Barrel Cactus"
        }
        Some(PlantType::Herb) => {
            "- Origin: Mediterranean and temperate climates\n\
             - Natural habitat: Well-draining soil with morning sun\n\
             - Growth pattern: Fast-growing, produces aromatic compounds\n\
             - Common varieties: Basil, Rosemary, Thyme, Mint"
        }
        Some(PlantType::Vine) => {
            "- Origin: Forest floors and climbing environments\n\
             - Natural habitat: Climbing towards light sources\n\
             - Growth pattern: Trailing or climbing with aerial roots\n\
             - Common varieties: Pothos, Heartleaf Philodendron, English Ivy"
        }
        Some(PlantType::Fern) => {
            "- Origin: Shaded forest floors with high humidity\n\
             - Natural habitat: Low light, high moisture environments\n\
             - Growth pattern: Slow-growing with delicate fronds\n\
             - Common varieties: Boston Fern, Maidenhair Fern, Bird's Nest Fern"
        }
        None => UNKNOWN_TYPE_INFO,
    }
}

/// Care guidelines
pub fn care_instructions(plant_type: Option<PlantType>) -> &'static str {
    match plant_type {
        Some(PlantType::Tropical) => {
            "- Watering: Keep soil consistently moist but not soggy\n\
             - Light: Bright, indirect light (avoid direct sun)\n\
             - Humidity: High humidity (50-60%) - mist regularly\n\
             - Temperature: Warm (65-80°F)\n\
             - Fertilizer: Monthly during growing season\n\
             - Signs of happiness: New growth, glossy leaves"
        }
        Some(PlantType::Succulent) => {
            "- Watering: Deep but infrequent watering when soil is completely dry\n\
             - Light: Bright, direct sunlight (6+ hours daily)\n\
             - Humidity: Low humidity preferred\n\
             - Temperature: Wide range tolerance (40-90°F)\n\
             - Fertilizer: Minimal - once or twice yearly\n\
             - Signs of happiness: Plump, colorful leaves"
        }
        Some(PlantType::Herb) => {
            "- Watering: Moderate watering when top inch of soil is dry\n\
             - Light: 6+ hours of direct sunlight\n\
             - Humidity: Moderate humidity\n\
             - Temperature: Cool to moderate (60-75°F)\n\
             - Fertilizer: Light feeding every 2-4 weeks\n\
             - Signs of happiness: Aromatic leaves, steady growth"
        }
        Some(PlantType::Vine) => {
            "- Watering: Moderate watering, allow slight drying between\n\
             - Light: Bright, indirect light\n\
             - Humidity: Moderate to high humidity\n\
             - Temperature: Moderate (65-75°F)\n\
             - Fertilizer: Monthly during growing season\n\
             - Signs of happiness: Trailing growth, heart-shaped leaves"
        }
        Some(PlantType::Fern) => {
            "- Watering: Keep soil consistently moist but not waterlogged\n\
             - Light: Low to medium indirect light (avoid direct sun)\n\
             - Humidity: Very high humidity (60-70%) - use humidifier\n\
             - Temperature: Cool to moderate (60-70°F)\n\
             - Fertilizer: Light monthly feeding in growing season\n\
             - Signs of happiness: Unfurling new fronds, lush green color"
        }
        None => UNKNOWN_CARE_INSTRUCTIONS,
    }
}
