//! Transcription result value object

/// Transcript returned by a transcription service, with the audio length it
/// measured when it reports one.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub duration_seconds: Option<f64>,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration_seconds: None,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    /// Authoritative duration if reported, otherwise `fallback`, rounded to the nearest second
    pub fn resolved_duration(&self, fallback: u64) -> i64 {
        self.duration_seconds
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(|s| s.round() as i64)
            .unwrap_or(fallback as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_duration_wins_and_rounds() {
        let t = Transcript::new("x").with_duration(125.6);
        assert_eq!(t.resolved_duration(60), 126);
    }

    #[test]
    fn falls_back_to_estimate() {
        assert_eq!(Transcript::new("x").resolved_duration(60), 60);
        assert_eq!(
            Transcript::new("x").with_duration(f64::NAN).resolved_duration(42),
            42
        );
    }
}
