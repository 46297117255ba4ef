//! Channel identifiers and the decoded feed event type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A monitored realtime-database path.
///
/// Humidity and temperature carry numeric time-series readings; gas
/// warning and light sensor carry boolean-style payloads where only the
/// latest value matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    Humidity,
    Temperature,
    GasWarning,
    LightSensor,
}

impl Channel {
    /// All monitored channels, in subscription order.
    pub const ALL: [Channel; 4] = [
        Channel::Humidity,
        Channel::Temperature,
        Channel::GasWarning,
        Channel::LightSensor,
    ];

    /// The backend path this channel is subscribed under.
    pub fn path(&self) -> &'static str {
        match self {
            Channel::Humidity => "humidity",
            Channel::Temperature => "temperature",
            Channel::GasWarning => "gasWarning",
            Channel::LightSensor => "lightSensor",
        }
    }

    /// True for channels whose readings are buffered into a series.
    pub fn is_series(&self) -> bool {
        matches!(self, Channel::Humidity | Channel::Temperature)
    }

    /// Display title for panels and chart headings.
    pub fn title(&self) -> &'static str {
        match self {
            Channel::Humidity => "Humidity",
            Channel::Temperature => "Temperature",
            Channel::GasWarning => "Gas Warning",
            Channel::LightSensor => "Light Sensor",
        }
    }
}

/// One decoded push notification from the realtime backend.
///
/// The payload is kept raw; validation happens at dispatch so a malformed
/// payload can be skipped without corrupting any buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEvent {
    pub channel: Channel,
    pub payload: Value,
}

impl FeedEvent {
    pub fn new(channel: Channel, payload: Value) -> Self {
        Self { channel, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_wire_names_are_camel_case() {
        assert_eq!(serde_json::to_string(&Channel::Humidity).unwrap(), r#""humidity""#);
        assert_eq!(
            serde_json::to_string(&Channel::GasWarning).unwrap(),
            r#""gasWarning""#
        );
        assert_eq!(
            serde_json::to_string(&Channel::LightSensor).unwrap(),
            r#""lightSensor""#
        );
    }

    #[test]
    fn test_channel_path_matches_wire_name() {
        for channel in Channel::ALL {
            let wire = serde_json::to_string(&channel).unwrap();
            assert_eq!(wire, format!("\"{}\"", channel.path()));
        }
    }

    #[test]
    fn test_series_classification() {
        assert!(Channel::Humidity.is_series());
        assert!(Channel::Temperature.is_series());
        assert!(!Channel::GasWarning.is_series());
        assert!(!Channel::LightSensor.is_series());
    }

    #[test]
    fn test_feed_event_deserializes_from_wire_json() {
        let event: FeedEvent =
            serde_json::from_str(r#"{"channel":"temperature","payload":21.5}"#).unwrap();
        assert_eq!(event.channel, Channel::Temperature);
        assert_eq!(event.payload, json!(21.5));
    }
}
