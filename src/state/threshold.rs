//! Display threshold bands for the remaining time

use serde::{Deserialize, Serialize};

/// Countdown value at or below which the timer is in the warning band
pub const WARNING_LIMIT: f32 = 12.0;
/// Countdown value at or below which the timer is in the alert band
pub const ALERT_LIMIT: f32 = 6.0;

/// Classification of the remaining time, used by clients to pick a text colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    #[default]
    None,
    Warning,
    Alert,
}

impl Threshold {
    /// Classify a countdown value
    pub fn from_countdown(countdown: f32) -> Self {
        if countdown <= ALERT_LIMIT {
            Threshold::Alert
        } else if countdown <= WARNING_LIMIT {
            Threshold::Warning
        } else {
            Threshold::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Threshold::None => "none",
            Threshold::Warning => "warning",
            Threshold::Alert => "alert",
        }
    }

    /// Colour token for the minutes/seconds text
    pub fn text_color(&self) -> &'static str {
        match self {
            Threshold::None => "default",
            Threshold::Warning => "pause",
            Threshold::Alert => "stop",
        }
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_switch_at_limits() {
        assert_eq!(Threshold::from_countdown(362.0), Threshold::None);
        assert_eq!(Threshold::from_countdown(13.0), Threshold::None);
        assert_eq!(Threshold::from_countdown(12.0), Threshold::Warning);
        assert_eq!(Threshold::from_countdown(7.0), Threshold::Warning);
        assert_eq!(Threshold::from_countdown(6.0), Threshold::Alert);
        assert_eq!(Threshold::from_countdown(2.0), Threshold::Alert);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Threshold::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(Threshold::Alert.text_color(), "stop");
    }
}
