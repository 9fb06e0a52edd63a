//! Plot property definitions and typed reading
//!
//! Property definitions and their defaults live in plot_properties.json,
//! embedded at compile time, so defaults are defined in ONE place. User values
//! come from a JSON properties file and/or `name=value` overrides and always
//! take precedence when valid.

use super::error::{GridError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// plot_properties.json embedded at compile time
const PROPERTIES_JSON: &str = include_str!("../../plot_properties.json");

/// Property definition from plot_properties.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    /// For EnumeratedProperty, the valid values
    #[serde(rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct PropertiesFile {
    properties: Vec<PropertyDef>,
}

/// Registry of all plot properties with their defaults
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    pub fn from_json(json: &str) -> Result<Self> {
        let file: PropertiesFile = serde_json::from_str(json)
            .map_err(|e| GridError::Config(format!("Invalid property definitions: {}", e)))?;

        let properties = file
            .properties
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();

        Ok(Self { properties })
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }
}

static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(PROPERTIES_JSON).unwrap_or_else(|e| {
            eprintln!("ERROR: Failed to load plot_properties.json: {}", e);
            PropertyRegistry::default()
        })
    })
}

/// A user-set property value, as stored in a properties file
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyValue {
    pub name: String,
    pub value: String,
}

/// Typed property reader
///
/// Reads user-set values, falling back to the registry default when a value
/// is missing or invalid.
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    pub fn new(values: impl IntoIterator<Item = PropertyValue>) -> Self {
        let user_values = values
            .into_iter()
            .filter(|p| !p.value.is_empty()) // Empty = not set
            .map(|p| (p.name, p.value))
            .collect();

        Self { user_values }
    }

    /// Load from a JSON file holding `[{"name": ..., "value": ...}, ...]`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let values: Vec<PropertyValue> = serde_json::from_str(&contents).map_err(|e| {
            GridError::Config(format!("Invalid properties file {}: {}", path.display(), e))
        })?;
        Ok(Self::new(values))
    }

    /// Apply a `name=value` override
    pub fn set_override(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            GridError::Config(format!("Expected name=value, got '{}'", assignment))
        })?;

        let name = name.trim();
        if registry().get_property(name).is_none() {
            eprintln!("WARN: Unknown property '{}' will be ignored", name);
        }

        let value = value.trim();
        if value.is_empty() {
            self.user_values.remove(name);
        } else {
            self.user_values.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    /// User value if present, otherwise the registry default
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Get enumerated property, falling back to the default if invalid
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.clone();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            eprintln!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value, name, valid_values, default
            );
        }

        default.to_string()
    }

    /// Get f64 property, falling back to the default when unparsable
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = self.default_f64(name);

        match self.user_values.get(name) {
            None => default,
            Some(value) => value.trim().parse::<f64>().unwrap_or_else(|_| {
                eprintln!(
                    "Invalid numeric value '{}' for property '{}'. Using default: {}",
                    value, name, default
                );
                default
            }),
        }
    }

    /// Get f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        if (min..=max).contains(&value) {
            return value;
        }

        let default = self.default_f64(name);
        eprintln!(
            "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
            value, name, min, max, default
        );
        default
    }

    /// Get usize property with range validation
    pub fn get_usize_in_range(&self, name: &str, min: usize, max: usize) -> usize {
        let default = registry()
            .get_default(name)
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(min);

        let Some(raw) = self.user_values.get(name) else {
            return default;
        };

        match raw.trim().parse::<usize>() {
            Ok(v) if (min..=max).contains(&v) => v,
            _ => {
                eprintln!(
                    "Invalid value '{}' for property '{}' (expected integer in [{}, {}]). Using default: {}",
                    raw, name, min, max, default
                );
                default
            }
        }
    }

    fn default_f64(&self, name: &str) -> f64 {
        registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

/// Plot dimension - either explicit pixels or "auto" (derived from grid size)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlotDimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl PlotDimension {
    /// Parse from string property value
    ///
    /// Valid formats:
    /// - "auto" or "" (empty) → Auto
    /// - "1500" → Pixels(1500) if in valid range [100, 10000]
    pub fn parse(value: &str, default: PlotDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return PlotDimension::Auto;
        }

        match trimmed.parse::<u32>() {
            Ok(px) if (100..=10000).contains(&px) => PlotDimension::Pixels(px),
            Ok(px) => {
                eprintln!(
                    "⚠ Plot dimension {} out of valid range [100-10000], using default: {:?}",
                    px, default
                );
                default
            }
            Err(_) => {
                eprintln!(
                    "⚠ Invalid plot dimension '{}', using default: {:?}",
                    trimmed, default
                );
                default
            }
        }
    }

    /// Resolve to actual pixels
    ///
    /// For Auto: 640px plus 16px per grid line along this axis, capped at 1600px.
    pub fn resolve(&self, n_cells: usize) -> u32 {
        match self {
            PlotDimension::Pixels(px) => *px,
            PlotDimension::Auto => {
                const BASE_SIZE: u32 = 640;
                const SIZE_PER_CELL: u32 = 16;
                const MAX_SIZE: u32 = 1600;

                let cells = n_cells.min(MAX_SIZE as usize) as u32;
                (BASE_SIZE + cells * SIZE_PER_CELL).min(MAX_SIZE)
            }
        }
    }
}
