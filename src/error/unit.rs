use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnitError {
    #[error("unhandled source unit type: {unit_type}")]
    UnhandledType { unit_type: String },

    #[error("invalid {unit_type} record: {source}")]
    Json {
        unit_type: String,
        source: serde_json::Error,
    },
}

impl UnitError {
    pub fn unhandled_type(unit_type: impl Into<String>) -> Self {
        Self::UnhandledType {
            unit_type: unit_type.into(),
        }
    }

    pub fn json(unit_type: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            unit_type: unit_type.into(),
            source,
        }
    }
}
