use serde::{Deserialize, Serialize};

/// The seven telemetry inputs the inference service expects, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ambient,
    Coolant,
    UD,
    UQ,
    MotorSpeed,
    ID,
    IQ,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Ambient,
        Field::Coolant,
        Field::UD,
        Field::UQ,
        Field::MotorSpeed,
        Field::ID,
        Field::IQ,
    ];

    /// JSON key used on the wire.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Ambient => "ambient",
            Field::Coolant => "coolant",
            Field::UD => "u_d",
            Field::UQ => "u_q",
            Field::MotorSpeed => "motor_speed",
            Field::ID => "i_d",
            Field::IQ => "i_q",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Ambient => "Ambient Temperature",
            Field::Coolant => "Coolant Temperature",
            Field::UD => "Voltage d-component",
            Field::UQ => "Voltage q-component",
            Field::MotorSpeed => "Motor Speed",
            Field::ID => "Current d-component",
            Field::IQ => "Current q-component",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Field::Ambient | Field::Coolant => "°C",
            Field::UD | Field::UQ => "V",
            Field::MotorSpeed => "RPM",
            Field::ID | Field::IQ => "A",
        }
    }

    /// Advisory input range for the form widget. Not enforced anywhere.
    pub fn hint_range(&self) -> (f64, f64, f64) {
        match self {
            Field::Ambient | Field::Coolant => (0.0, 50.0, 0.1),
            Field::UD | Field::UQ => (-100.0, 100.0, 0.1),
            Field::MotorSpeed => (0.0, 5000.0, 1.0),
            Field::ID | Field::IQ => (-100.0, 100.0, 0.1),
        }
    }

    fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Raw form state: the seven fields as entered, before any validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySample {
    values: [String; 7],
}

impl TelemetrySample {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed example values from the reference dataset.
    pub fn sample_data() -> Self {
        let mut s = Self::new();
        let demo = ["25.5", "22.3", "0.45", "0.38", "1500", "12.5", "15.2"];
        for (field, value) in Field::ALL.iter().zip(demo) {
            s.set(*field, value.to_string());
        }
        s
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: String) {
        self.values[field.index()] = value;
    }

    pub fn clear(&mut self) {
        self.values = Default::default();
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.is_empty())
    }
}

/// Validated numeric record, serialized as the /predict request body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSample {
    pub ambient: f64,
    pub coolant: f64,
    pub u_d: f64,
    pub u_q: f64,
    pub motor_speed: f64,
    pub i_d: f64,
    pub i_q: f64,
}

impl NormalizedSample {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Ambient => self.ambient,
            Field::Coolant => self.coolant,
            Field::UD => self.u_d,
            Field::UQ => self.u_q,
            Field::MotorSpeed => self.motor_speed,
            Field::ID => self.i_d,
            Field::IQ => self.i_q,
        }
    }
}
