//! Sentiment values.
//!
//! Older records carry a categorical label, newer ones a number in -1..1.
//! Both are accepted on the wire; business logic only ever sees [`Sentiment::score`].

use serde::{Deserialize, Serialize};

/// Legacy categorical sentiment labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn score(&self) -> f64 {
        match self {
            SentimentLabel::Positive => 1.0,
            SentimentLabel::Neutral => 0.0,
            SentimentLabel::Negative => -1.0,
        }
    }
}

/// A sentiment reading, either numeric or categorical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sentiment {
    /// From -1.0 (hostile) to 1.0 (favourable).
    Numeric(f64),
    Categorical(SentimentLabel),
}

impl Sentiment {
    /// Normalised numeric value in -1.0..=1.0.
    pub fn score(&self) -> f64 {
        match self {
            Sentiment::Numeric(value) if value.is_finite() => value.clamp(-1.0, 1.0),
            Sentiment::Numeric(_) => 0.0,
            Sentiment::Categorical(label) => label.score(),
        }
    }
}

impl Default for Sentiment {
    fn default() -> Self {
        Sentiment::Numeric(0.0)
    }
}

impl From<f64> for Sentiment {
    fn from(value: f64) -> Self {
        Sentiment::Numeric(value)
    }
}

impl From<SentimentLabel> for Sentiment {
    fn from(label: SentimentLabel) -> Self {
        Sentiment::Categorical(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_sentiment_is_clamped() {
        assert_eq!(Sentiment::Numeric(0.4).score(), 0.4);
        assert_eq!(Sentiment::Numeric(3.0).score(), 1.0);
        assert_eq!(Sentiment::Numeric(-7.5).score(), -1.0);
        assert_eq!(Sentiment::Numeric(f64::NAN).score(), 0.0);
    }

    #[test]
    fn test_categorical_sentiment_scores() {
        assert_eq!(Sentiment::from(SentimentLabel::Positive).score(), 1.0);
        assert_eq!(Sentiment::from(SentimentLabel::Neutral).score(), 0.0);
        assert_eq!(Sentiment::from(SentimentLabel::Negative).score(), -1.0);
    }

    #[test]
    fn test_sentiment_deserializes_both_shapes() {
        let numeric: Sentiment = serde_json::from_str("-0.25").unwrap();
        assert_eq!(numeric, Sentiment::Numeric(-0.25));

        let label: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(label, Sentiment::Categorical(SentimentLabel::Negative));

        let integer: Sentiment = serde_json::from_str("1").unwrap();
        assert_eq!(integer.score(), 1.0);
    }
}
