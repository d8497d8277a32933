use chrono::{DateTime, Local};
use std::collections::HashMap;

pub const CSV_HEADER: [&str; 7] = [
    "Timestamp",
    "Voltage",
    "Current",
    "Power",
    "Energy",
    "Frequency",
    "Power Factor",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stored in place of any measurement field absent from a message.
pub const PLACEHOLDER: &str = "N/A";

/// One decoded measurement sample. Field values are kept as the raw text
/// tokens from the wire; nothing is re-encoded as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub timestamp: String,
    pub voltage: String,
    pub current: String,
    pub power: String,
    pub energy: String,
    pub frequency: String,
    pub pf: String,
}

impl Reading {
    /// Build a reading from decoded key-value pairs. Known keys missing from
    /// the map become the placeholder; unknown keys are ignored.
    pub fn from_fields(received_at: DateTime<Local>, fields: &HashMap<String, String>) -> Self {
        let take = |key: &str| {
            fields
                .get(key)
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        };

        Self {
            timestamp: received_at.format(TIMESTAMP_FORMAT).to_string(),
            voltage: take("voltage"),
            current: take("current"),
            power: take("power"),
            energy: take("energy"),
            frequency: take("frequency"),
            pf: take("pf"),
        }
    }

    /// The 7 row fields, in fixed column order matching `CSV_HEADER`.
    pub fn record(&self) -> [&str; 7] {
        [
            self.timestamp.as_str(),
            self.voltage.as_str(),
            self.current.as_str(),
            self.power.as_str(),
            self.energy.as_str(),
            self.frequency.as_str(),
            self.pf.as_str(),
        ]
    }
}
