//! Static city catalog: selection options, weather records and scene types

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Textual weather condition shown on the card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Condition {
    Sunny,
    Rainy,
    Snowy,
    Windy,
    Cloudy,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::Rainy => "Rainy",
            Condition::Snowy => "Snowy",
            Condition::Windy => "Windy",
            Condition::Cloudy => "Cloudy",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Animation category for the scene.
///
/// Chosen from the city identifier, never from the condition text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum WeatherType {
    Sunny,
    Rainy,
    Snowy,
    Windy,
    #[default]
    Cloudy,
}

impl WeatherType {
    /// Marker class applied to the scene while this type is active
    pub fn marker(&self) -> &'static str {
        match self {
            WeatherType::Sunny => "animate-sunny",
            WeatherType::Rainy => "animate-rainy",
            WeatherType::Snowy => "animate-snowy",
            WeatherType::Windy => "animate-windy",
            WeatherType::Cloudy => "animate-cloudy",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherRecord {
    /// Degrees Celsius
    pub temperature: i32,
    pub condition: Condition,
    pub advice: String,
}

impl WeatherRecord {
    pub fn new(temperature: i32, condition: Condition, advice: impl Into<String>) -> Self {
        Self {
            temperature,
            condition,
            advice: advice.into(),
        }
    }

    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.temperature)
    }
}

/// One entry of the city picker
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CityOption {
    pub id: String,
    pub name: String,
}

/// Lookup tables injected into the dashboard state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    pub options: Vec<CityOption>,
    pub records: BTreeMap<String, WeatherRecord>,
    pub weather_types: BTreeMap<String, WeatherType>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(
            "nairobi",
            "Nairobi",
            WeatherRecord::new(26, Condition::Sunny, "Perfect day for a walk!"),
            WeatherType::Sunny,
        );
        catalog.insert(
            "tokyo",
            "Tokyo",
            WeatherRecord::new(18, Condition::Rainy, "Don’t forget your umbrella."),
            WeatherType::Rainy,
        );
        catalog.insert(
            "new-york",
            "New York",
            WeatherRecord::new(-5, Condition::Snowy, "Bundle up! It's freezing!"),
            WeatherType::Snowy,
        );
        catalog.insert(
            "sydney",
            "Sydney",
            WeatherRecord::new(30, Condition::Windy, "Hold onto your hat!"),
            WeatherType::Windy,
        );
        catalog.insert(
            "oslo",
            "Oslo",
            WeatherRecord::new(2, Condition::Cloudy, "Gray skies, but no rain today."),
            WeatherType::Cloudy,
        );
        catalog
    }

    pub fn empty() -> Self {
        Self {
            options: Vec::new(),
            records: BTreeMap::new(),
            weather_types: BTreeMap::new(),
        }
    }

    /// Add a city to all three tables
    pub fn insert(
        &mut self,
        id: &str,
        name: &str,
        record: WeatherRecord,
        weather_type: WeatherType,
    ) {
        self.options.push(CityOption {
            id: id.to_string(),
            name: name.to_string(),
        });
        self.records.insert(id.to_string(), record);
        self.weather_types.insert(id.to_string(), weather_type);
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn option(&self, index: usize) -> Option<&CityOption> {
        self.options.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.options.iter().position(|opt| opt.id == id)
    }

    pub fn record(&self, id: &str) -> Result<&WeatherRecord, CatalogError> {
        self.records
            .get(id)
            .ok_or_else(|| CatalogError::MissingRecord(id.to_string()))
    }

    /// Scene type for a city; unmapped ids get the cloudy scene
    pub fn weather_type(&self, id: &str) -> WeatherType {
        self.weather_types.get(id).copied().unwrap_or_default()
    }

    /// Every option must be unique and backed by a record
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for opt in &self.options {
            if !seen.insert(opt.id.as_str()) {
                return Err(CatalogError::DuplicateCity(opt.id.clone()));
            }
            self.record(&opt.id)?;
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
