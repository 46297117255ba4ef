//! Binary status projection for boolean-style channels.
//!
//! Gas warning and light sensor pushes carry no history; only the latest
//! payload matters, mapped through JSON truthiness to a two-state status.

use serde_json::Value;

use crate::feed::Channel;

/// Latest state of a boolean-style channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryStatus {
    Detected,
    NotDetected,
}

impl BinaryStatus {
    /// Derive a status from a raw payload.
    ///
    /// Truthiness follows the backend's JSON conventions: `null`, `false`,
    /// `0` and the empty string are falsy, everything else is truthy.
    pub fn from_payload(payload: &Value) -> Self {
        let truthy = match payload {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        if truthy {
            BinaryStatus::Detected
        } else {
            BinaryStatus::NotDetected
        }
    }

    /// Display label for this status on the given channel.
    ///
    /// The wording is channel-specific: a gas sensor warns, a light sensor
    /// detects.
    pub fn label(&self, channel: Channel) -> &'static str {
        match (channel, self) {
            (Channel::GasWarning, BinaryStatus::Detected) => "Warning",
            (Channel::GasWarning, BinaryStatus::NotDetected) => "No Warning",
            (Channel::LightSensor, BinaryStatus::Detected) => "Light Detected",
            (Channel::LightSensor, BinaryStatus::NotDetected) => "No Light",
            // Series channels never carry a binary status.
            (Channel::Humidity | Channel::Temperature, _) => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_payloads_are_detected() {
        for payload in [json!(true), json!(1), json!(-3.5), json!("on"), json!([0]), json!({"v": 1})] {
            assert_eq!(BinaryStatus::from_payload(&payload), BinaryStatus::Detected);
        }
    }

    #[test]
    fn test_falsy_payloads_are_not_detected() {
        for payload in [json!(false), json!(null), json!(0), json!(0.0), json!("")] {
            assert_eq!(
                BinaryStatus::from_payload(&payload),
                BinaryStatus::NotDetected
            );
        }
    }

    #[test]
    fn test_gas_warning_labels() {
        assert_eq!(
            BinaryStatus::from_payload(&json!(true)).label(Channel::GasWarning),
            "Warning"
        );
        assert_eq!(
            BinaryStatus::from_payload(&json!(false)).label(Channel::GasWarning),
            "No Warning"
        );
        assert_eq!(
            BinaryStatus::from_payload(&json!(null)).label(Channel::GasWarning),
            "No Warning"
        );
    }

    #[test]
    fn test_light_sensor_labels() {
        assert_eq!(
            BinaryStatus::Detected.label(Channel::LightSensor),
            "Light Detected"
        );
        assert_eq!(
            BinaryStatus::NotDetected.label(Channel::LightSensor),
            "No Light"
        );
    }
}
