// Status classification for the alarm console and status panel
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Nominal,
    Fault,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorColor {
    Green,
    Red,
    Gray,
}

/// Map a reported status string to its severity tier.
///
/// Matching is exact and case-sensitive; anything not in the table is `Unknown`.
pub fn classify(status: &str) -> Severity {
    match status {
        "IN RANGE" | "NORMAL" | "STABLE" | "ACTIVE" | "Connected" | "Activated" | "Recording"
        | "Responding" => Severity::Nominal,
        "O.F.RANGE" | "FAILED" | "Critical" => Severity::Fault,
        _ => Severity::Unknown,
    }
}

/// Dot colour next to a status. Narrower than `classify`: only the sensor
/// range and subsystem states light up, everything else stays gray.
pub fn indicator_color(status: &str) -> IndicatorColor {
    match status {
        "IN RANGE" | "NORMAL" | "STABLE" | "ACTIVE" => IndicatorColor::Green,
        "O.F.RANGE" | "FAILED" => IndicatorColor::Red,
        _ => IndicatorColor::Gray,
    }
}

/// A single labelled status as shown on the console.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReading {
    pub label: String,
    pub status: String,
    pub severity: Severity,
    pub indicator: IndicatorColor,
}

impl StatusReading {
    pub fn new(label: impl Into<String>, status: &str) -> Self {
        Self {
            label: label.into(),
            status: status.to_string(),
            severity: classify(status),
            indicator: indicator_color(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_statuses() {
        assert_eq!(classify("FAILED"), Severity::Fault);
        assert_eq!(classify("O.F.RANGE"), Severity::Fault);
        assert_eq!(classify("Critical"), Severity::Fault);
        assert_eq!(classify("STABLE"), Severity::Nominal);
        assert_eq!(classify("Responding"), Severity::Nominal);
        assert_eq!(classify("Connected"), Severity::Nominal);
    }

    #[test]
    fn test_classify_unknown_is_total() {
        assert_eq!(classify("banana"), Severity::Unknown);
        assert_eq!(classify(""), Severity::Unknown);
        assert_eq!(classify("failed"), Severity::Unknown);
        assert_eq!(classify(" STABLE"), Severity::Unknown);
        assert_eq!(indicator_color(""), IndicatorColor::Gray);
    }

    #[test]
    fn test_indicator_table() {
        for status in ["IN RANGE", "NORMAL", "STABLE", "ACTIVE"] {
            assert_eq!(indicator_color(status), IndicatorColor::Green);
        }
        for status in ["O.F.RANGE", "FAILED"] {
            assert_eq!(indicator_color(status), IndicatorColor::Red);
        }
        assert_eq!(indicator_color("OK"), IndicatorColor::Gray);
        assert_eq!(indicator_color("ON"), IndicatorColor::Gray);
    }

    #[test]
    fn test_indicator_grays_connection_and_critical() {
        for status in ["Connected", "Activated", "Recording", "Responding", "Critical"] {
            assert_eq!(indicator_color(status), IndicatorColor::Gray);
        }
        assert_eq!(classify("Connected"), Severity::Nominal);
        assert_eq!(classify("Critical"), Severity::Fault);
        let reading = StatusReading::new("Connection", "Connected");
        assert_eq!(reading.severity, Severity::Nominal);
        assert_eq!(reading.indicator, IndicatorColor::Gray);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&IndicatorColor::Gray).unwrap(), "\"gray\"");
        assert_eq!(serde_json::to_string(&Severity::Nominal).unwrap(), "\"NOMINAL\"");
    }

    #[test]
    fn test_status_reading() {
        let reading = StatusReading::new("Separation Activation", "FAILED");
        assert_eq!(reading.severity, Severity::Fault);
        assert_eq!(reading.indicator, IndicatorColor::Red);
        assert_eq!(reading.status, "FAILED");
    }
}
