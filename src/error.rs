use thiserror::Error;

use crate::pipeline::processing::quantity::QuantityError;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema validation failed: {}", .0.join("; "))]
    SchemaViolation(Vec<String>),

    #[error("Failed to transform drink {record}: {source}")]
    Transform {
        record: String,
        #[source]
        source: TransformError,
    },
}

/// Per-record failures raised while normalizing a single drink.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid ounce measure {measure:?} in slot {slot}: {reason}")]
    InvalidMeasureFormat {
        slot: usize,
        measure: String,
        reason: String,
    },

    #[error("Zero denominator in measure {measure:?} in slot {slot}")]
    ArithmeticFault { slot: usize, measure: String },
}

impl TransformError {
    /// Short stable name for diagnostics and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            TransformError::MissingField(_) => "missing_field",
            TransformError::InvalidMeasureFormat { .. } => "invalid_measure_format",
            TransformError::ArithmeticFault { .. } => "arithmetic_fault",
        }
    }

    pub(crate) fn from_quantity(slot: usize, measure: &str, err: QuantityError) -> Self {
        match err {
            QuantityError::DivideByZero(_) => TransformError::ArithmeticFault {
                slot,
                measure: measure.to_string(),
            },
            QuantityError::InvalidFormat(reason) => TransformError::InvalidMeasureFormat {
                slot,
                measure: measure.to_string(),
                reason,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
