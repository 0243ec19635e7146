// Signal treatment descriptor
// Records how a gated signal was produced and the overlap its detections were scored with

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreatmentParseError {
    #[error("Expected 4 '_'-separated parts in '{0}'")]
    WrongPartCount(String),

    #[error("Cannot parse threshold dB from '{0}'")]
    Threshold(String),

    #[error("Cannot parse low bandpass frequency from '{0}'")]
    LowFreq(String),

    #[error("Cannot parse high bandpass frequency from '{0}'")]
    HighFreq(String),

    #[error("Cannot parse min_required_overlap from '{0}'")]
    Overlap(String),
}

/// Noise gate and bandpass settings behind one detection run
/// Flat form: `-30dB_10Hz_50Hz_10perc`, or `..._noneperc` before an overlap is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalTreatment {
    /// Level (dB relative to signal RMS) below which the signal was zeroed
    pub threshold_db: i32,

    /// Lower corner of the front-end bandpass filter (Hz)
    pub low_freq: u32,

    /// Upper corner of the front-end bandpass filter (Hz)
    pub high_freq: u32,

    /// Percent of a labeled call a detection must cover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_required_overlap: Option<u32>,
}

impl SignalTreatment {
    pub fn new(threshold_db: i32, low_freq: u32, high_freq: u32) -> Self {
        SignalTreatment {
            threshold_db,
            low_freq,
            high_freq,
            min_required_overlap: None,
        }
    }

    /// Same treatment with the required overlap filled in
    pub fn with_overlap(mut self, percent: u32) -> Self {
        self.min_required_overlap = Some(percent);
        self
    }

    /// Equal gating and filtering, ignoring the overlap
    pub fn same_signal_processing(&self, other: &SignalTreatment) -> bool {
        self.threshold_db == other.threshold_db
            && self.low_freq == other.low_freq
            && self.high_freq == other.high_freq
    }

    /// Required overlap as a ratio in [0, 1]
    pub fn min_overlap_ratio(&self) -> Option<f64> {
        self.min_required_overlap.map(|p| p as f64 / 100.0)
    }
}

impl fmt::Display for SignalTreatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}dB_{}Hz_{}Hz_",
            self.threshold_db, self.low_freq, self.high_freq
        )?;
        match self.min_required_overlap {
            Some(percent) => write!(f, "{}perc", percent),
            None => write!(f, "noneperc"),
        }
    }
}

impl FromStr for SignalTreatment {
    type Err = TreatmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('_').collect();
        let [threshold, low, high, overlap] = parts[..] else {
            return Err(TreatmentParseError::WrongPartCount(s.to_string()));
        };

        let threshold_db = threshold
            .strip_suffix("dB")
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(|| TreatmentParseError::Threshold(s.to_string()))?;

        let low_freq = low
            .strip_suffix("Hz")
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| TreatmentParseError::LowFreq(s.to_string()))?;

        let high_freq = high
            .strip_suffix("Hz")
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| TreatmentParseError::HighFreq(s.to_string()))?;

        let overlap = overlap
            .strip_suffix("perc")
            .ok_or_else(|| TreatmentParseError::Overlap(s.to_string()))?;
        let min_required_overlap = if overlap.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(
                overlap
                    .parse::<u32>()
                    .map_err(|_| TreatmentParseError::Overlap(s.to_string()))?,
            )
        };

        Ok(SignalTreatment {
            threshold_db,
            low_freq,
            high_freq,
            min_required_overlap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_string_round_trip() {
        let treatment = SignalTreatment::new(-30, 10, 50).with_overlap(10);
        assert_eq!(treatment.to_string(), "-30dB_10Hz_50Hz_10perc");

        let parsed: SignalTreatment = "-30dB_10Hz_50Hz_10perc".parse().unwrap();
        assert_eq!(parsed, treatment);
    }

    #[test]
    fn test_no_overlap_yet() {
        let treatment = SignalTreatment::new(-40, 300, 1000);
        assert_eq!(treatment.to_string(), "-40dB_300Hz_1000Hz_noneperc");

        let parsed: SignalTreatment = "-40dB_300Hz_1000Hz_Noneperc".parse().unwrap();
        assert_eq!(parsed.min_required_overlap, None);
        assert_eq!(parsed.min_overlap_ratio(), None);
    }

    #[test]
    fn test_parse_errors_name_the_part() {
        assert!(matches!(
            "-30dB_10Hz_50Hz".parse::<SignalTreatment>(),
            Err(TreatmentParseError::WrongPartCount(_))
        ));
        assert!(matches!(
            "loud_10Hz_50Hz_10perc".parse::<SignalTreatment>(),
            Err(TreatmentParseError::Threshold(_))
        ));
        assert!(matches!(
            "-30dB_xHz_50Hz_10perc".parse::<SignalTreatment>(),
            Err(TreatmentParseError::LowFreq(_))
        ));
        assert!(matches!(
            "-30dB_10Hz_50_10perc".parse::<SignalTreatment>(),
            Err(TreatmentParseError::HighFreq(_))
        ));
        assert!(matches!(
            "-30dB_10Hz_50Hz_perc".parse::<SignalTreatment>(),
            Err(TreatmentParseError::Overlap(_))
        ));
    }

    #[test]
    fn test_signal_processing_equality_ignores_overlap() {
        let base = SignalTreatment::new(-20, 10, 5);
        let with_overlap = base.with_overlap(25);

        assert!(base.same_signal_processing(&with_overlap));
        assert_ne!(base, with_overlap);
        assert_eq!(with_overlap.min_overlap_ratio(), Some(0.25));
    }
}
