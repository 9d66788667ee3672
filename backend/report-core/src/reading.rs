//! Caller-supplied pool readings.

use crate::error::ReportError;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key the prompt asks the model to size dosages against.
pub const POOL_VOLUME_KEY: &str = "pool_volume";

/// An open set of measurements, e.g. `{"fc": 1.2, "ph": 7.8, "pool_volume": 45000}`.
///
/// No schema is enforced. Unknown keys are carried into the prompt as-is and
/// missing ones are left for the model to point out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingInput(Map<String, Value>);

impl ReadingInput {
    /// Parse a raw request body.
    ///
    /// An empty body and a literal `null` both mean "no readings".
    ///
    /// # Errors
    /// [`ReportError::InvalidInput`] for text that is not JSON, or JSON that
    /// is not an object.
    #[track_caller]
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ReportError> {
        if body.trim_ascii().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| {
            ReportError::invalid_input(format!("Request body is not valid JSON: {e}"))
        })?;

        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(readings) => Ok(Self(readings)),
            _ => Err(ReportError::invalid_input(
                "Request body must be a JSON object of readings",
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_pool_volume(&self) -> bool {
        self.0.get(POOL_VOLUME_KEY).is_some_and(|v| !v.is_null())
    }

    /// Pretty-printed JSON, exactly as embedded in the prompt.
    pub fn to_pretty_json(&self) -> String {
        format!("{:#}", Value::Object(self.0.clone()))
    }
}
