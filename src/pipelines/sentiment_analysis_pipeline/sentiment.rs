use serde::Serialize;

use crate::models::Label;

/// Sentiment derived from a classifier label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// `1` is positive; every other label, including ones outside the binary
    /// convention, is negative.
    pub fn from_label(label: Label) -> Self {
        if label.is_positive() {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }

    /// Display string used in the result table and CSV export.
    pub fn tag(&self) -> &'static str {
        match self {
            Sentiment::Positive => "\u{2705} Positiva",
            Sentiment::Negative => "\u{26a0}\u{fe0f} Negativa",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Predicted label and sentiment for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub sentiment: Sentiment,
}

impl Prediction {
    pub fn from_label(label: Label) -> Self {
        Self {
            label,
            sentiment: Sentiment::from_label(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_is_positive() {
        assert_eq!(Sentiment::from_label(Label(1)), Sentiment::Positive);
        assert_eq!(Sentiment::from_label(Label(0)), Sentiment::Negative);
        assert_eq!(Sentiment::from_label(Label(2)), Sentiment::Negative);
        assert_eq!(Sentiment::from_label(Label(-1)), Sentiment::Negative);
    }

    #[test]
    fn tags() {
        assert_eq!(Sentiment::Positive.tag(), "✅ Positiva");
        assert_eq!(Sentiment::Negative.tag(), "⚠️ Negativa");
        assert_eq!(Sentiment::Negative.to_string(), "Negative");
    }
}
