use super::Value;
use serde::{Deserialize, Serialize};

/// Classification of the values carried by one axis for a whole draw call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Date,
    Number,
    #[default]
    String,
}

impl AxisType {
    /// Maps a field type name onto an axis type. Anything unrecognised is a string axis.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "date" | "datetime" | "timestamp" | "time" => Self::Date,
            "number" | "numeric" | "integer" | "int" | "long" | "float" | "double" | "decimal" => {
                Self::Number
            }
            _ => Self::String,
        }
    }

    /// Classifies an axis from its values: all dates, all numbers, or otherwise string.
    pub fn classify<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut seen: Option<Self> = None;
        for value in values {
            let kind = match value {
                Value::Date(_) => Self::Date,
                Value::Number(_) => Self::Number,
                Value::Text(_) => return Self::String,
            };
            match seen {
                None => seen = Some(kind),
                Some(previous) if previous != kind => return Self::String,
                Some(_) => {}
            }
        }
        seen.unwrap_or_default()
    }

    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Date | Self::Number)
    }
}
