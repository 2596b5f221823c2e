use thiserror::Error;

use crate::sample::{Field, NormalizedSample, TelemetrySample};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please fill in all fields (missing: {})", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Convert the raw form into the numeric record sent to the server.
///
/// All seven fields must be non-empty and parse as finite floats. NaN and
/// infinity are rejected here so they never reach the wire.
pub fn normalize(sample: &TelemetrySample) -> Result<NormalizedSample, ValidationError> {
    let missing: Vec<&'static str> = Field::ALL
        .iter()
        .filter(|f| sample.get(**f).trim().is_empty())
        .map(|f| f.key())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    let mut parsed = [0.0f64; 7];
    for (slot, field) in parsed.iter_mut().zip(Field::ALL) {
        let raw = sample.get(field).trim();
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => *slot = v,
            _ => {
                return Err(ValidationError::InvalidNumber {
                    field: field.key(),
                    value: raw.to_string(),
                })
            }
        }
    }

    Ok(NormalizedSample {
        ambient: parsed[0],
        coolant: parsed[1],
        u_d: parsed[2],
        u_q: parsed[3],
        motor_speed: parsed[4],
        i_d: parsed[5],
        i_q: parsed[6],
    })
}
