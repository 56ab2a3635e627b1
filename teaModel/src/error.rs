use std::fmt;

use serde::Serialize;

#[derive(Debug)]
pub enum TeaError {
    /// A required parameter group was not supplied before an evaluation.
    Configuration(String),
    /// A numeric input outside the domain where the cost formulas are defined.
    Domain {
        parameter: String,
        value: f64,
        reason: String,
    },
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

pub type TeaResult<T> = Result<T, TeaError>;

impl TeaError {
    pub fn domain(parameter: &str, value: f64, reason: &str) -> Self {
        TeaError::Domain {
            parameter: parameter.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    /// Build a configuration error naming every missing parameter group.
    pub fn missing(groups: &[&str]) -> Self {
        TeaError::Configuration(format!(
            "missing parameter groups: {}",
            groups.join(", ")
        ))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, TeaError::Configuration(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, TeaError::Domain { .. })
    }
}

impl From<std::io::Error> for TeaError {
    fn from(err: std::io::Error) -> Self {
        TeaError::Io(err)
    }
}

impl From<csv::Error> for TeaError {
    fn from(err: csv::Error) -> Self {
        TeaError::Csv(err)
    }
}

impl From<serde_json::Error> for TeaError {
    fn from(err: serde_json::Error) -> Self {
        TeaError::Json(err)
    }
}

impl fmt::Display for TeaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeaError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            TeaError::Domain { parameter, value, reason } => {
                write!(f, "Domain error: {} = {} ({})", parameter, value, reason)
            }
            TeaError::Io(e) => write!(f, "IO error: {}", e),
            TeaError::Csv(e) => write!(f, "CSV error: {}", e),
            TeaError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for TeaError {}

/// Non-fatal notice that an economic assumption sits outside its plausible range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeWarning {
    pub parameter: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl RangeWarning {
    /// Returns a warning when `value` falls outside `[min, max]`.
    pub fn check(parameter: &str, value: f64, (min, max): (f64, f64)) -> Option<Self> {
        if value < min || value > max {
            Some(Self {
                parameter: parameter.to_string(),
                value,
                min,
                max,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside the plausible range [{}, {}]",
            self.parameter, self.value, self.min, self.max
        )
    }
}
