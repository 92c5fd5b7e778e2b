use serde::{Deserialize, Serialize};
use serde_json::Value;

/// the single occupancy + temperature measurement held by the server
///
/// both fields carry whatever json value the device sent. only presence
/// is checked on ingest, so a string temperature is stored as a string.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// number of people in the room
    pub people_count: Value,

    /// temperature in celsius, may be fractional
    pub temperature: Value,
}

impl Reading {
    /// the startup / post-reset value: `{peopleCount: 0, temperature: 0}`
    pub fn zero() -> Self {
        Self {
            people_count: Value::from(0),
            temperature: Value::from(0),
        }
    }

    /// occupancy as a number, if the device sent one
    pub fn people(&self) -> Option<f64> {
        self.people_count.as_f64()
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::zero()
    }
}

/// body of `POST /update`
///
/// only a json object can carry the two keys. an array or scalar body, an
/// absent key and an explicit `null` all leave the field as `None`.
#[derive(Debug, Default)]
pub struct IngestPayload {
    pub people_count: Option<Value>,
    pub temperature: Option<Value>,
}

impl IngestPayload {
    pub fn from_body(body: Value) -> Self {
        let Value::Object(mut fields) = body else {
            return Self::default();
        };
        Self {
            people_count: fields.remove("peopleCount").filter(|v| !v.is_null()),
            temperature: fields.remove("temperature").filter(|v| !v.is_null()),
        }
    }

    /// a full reading, or `None` when either field is missing
    pub fn into_reading(self) -> Option<Reading> {
        match (self.people_count, self.temperature) {
            (Some(people_count), Some(temperature)) => Some(Reading { people_count, temperature }),
            _ => None,
        }
    }
}

/// echo of the stored values in the ingest response
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatus {
    pub people_in_room: Value,
    pub temperature: Value,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct IngestResponse {
    pub message: String,
    pub status: RoomStatus,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub message: String,
    pub latest_data: Reading,
}
