use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Closed set of houseplant categories.
///
/// The category selects the threshold profile, the chat personality and the
/// static care knowledge. Wire names are upper-case (`"TROPICAL"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlantType {
    Tropical,
    Succulent,
    Herb,
    Vine,
    Fern,
}

impl PlantType {
    pub const ALL: [PlantType; 5] = [
        PlantType::Tropical,
        PlantType::Succulent,
        PlantType::Herb,
        PlantType::Vine,
        PlantType::Fern,
    ];

    /// Upper-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantType::Tropical => "TROPICAL",
            PlantType::Succulent => "SUCCULENT",
            PlantType::Herb => "HERB",
            PlantType::Vine => "VINE",
            PlantType::Fern => "FERN",
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlantType {
    type Err = ParsePlantTypeError;

    /// Case-insensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PlantType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParsePlantTypeError(s.to_string()))
    }
}

/// Plant type name outside the known set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePlantTypeError(pub String);

impl fmt::Display for ParsePlantTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown plant type '{}': expected one of TROPICAL, SUCCULENT, HERB, VINE, FERN",
            self.0
        )
    }
}

impl std::error::Error for ParsePlantTypeError {}

/// Conversational temperament a user may pick for a plant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Personality {
    Playful,
    Wise,
    Sassy,
    Nurturing,
    Scientific,
}

impl Personality {
    pub fn describe(&self) -> &'static str {
        match self {
            Personality::Playful => "playful",
            Personality::Wise => "wise",
            Personality::Sassy => "sassy",
            Personality::Nurturing => "nurturing",
            Personality::Scientific => "scientific",
        }
    }
}

/// Kind of scalar a sensor reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    SoilMoisture,
    Light,
    Temperature,
    Humidity,
}

impl SensorKind {
    pub const ALL: [SensorKind; 4] = [
        SensorKind::SoilMoisture,
        SensorKind::Light,
        SensorKind::Temperature,
        SensorKind::Humidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::SoilMoisture => "soil_moisture",
            SensorKind::Light => "light",
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
        }
    }

    /// Inclusive range of physically meaningful values, `None` for unbounded.
    pub fn valid_range(&self) -> (f64, Option<f64>) {
        match self {
            SensorKind::SoilMoisture | SensorKind::Humidity => (0.0, Some(100.0)),
            SensorKind::Light => (0.0, None),
            SensorKind::Temperature => (-100.0, Some(200.0)),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown sensor type '{}'", s))
    }
}

/// A single timestamped sensor observation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub plant_id: Uuid,
    #[serde(rename = "sensorType")]
    pub kind: SensorKind,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Point in a plant's moisture/light history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub moisture: f64,
    pub light: f64,
    #[serde(default)]
    pub status: String,
}

/// Plant aggregate as handed to the evaluator and the prompt builder
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    #[serde(default)]
    pub id: Uuid,

    /// Owning user id; `None` for plants created anonymously
    #[serde(skip)]
    pub owner: Option<String>,

    pub name: String,

    /// `None` when the type is absent or not one of the known names
    #[serde(default, deserialize_with = "deserialize_lenient_plant_type")]
    pub plant_type: Option<PlantType>,

    #[serde(default)]
    pub personality: Option<Personality>,

    /// Current soil moisture (%), `None` until the first reading
    #[serde(default)]
    pub moisture: Option<f64>,

    /// Current light (lux), `None` until the first reading
    #[serde(default)]
    pub light: Option<f64>,

    #[serde(default)]
    pub status: String,

    /// Ordered oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Plant {
    pub fn new(name: impl Into<String>, plant_type: Option<PlantType>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: None,
            name: name.into(),
            plant_type,
            personality: None,
            moisture: None,
            light: None,
            status: String::new(),
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Accepts any string (or null) for a plant type, mapping names outside the
/// known set to `None` so partially valid plant state still loads.
fn deserialize_lenient_plant_type<'de, D>(deserializer: D) -> Result<Option<PlantType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| name.parse().ok()))
}
