use crate::config::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sentiment label assigned to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for sentiment labels read back from storage that match no variant.
#[derive(Debug, Error)]
#[error("unknown sentiment label: {0}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(UnknownSentiment(other.to_string())),
        }
    }
}

/// Keyword-root sentiment classifier.
///
/// Matching is case-sensitive substring containment against the configured
/// root sets. Negative roots are checked first: text carrying both a negative
/// and a positive root classifies as negative.
pub struct SentimentClassifier {
    rules: ClassifierConfig,
}

impl SentimentClassifier {
    pub fn new(rules: ClassifierConfig) -> Self {
        Self { rules }
    }

    /// Classify review text. Total: every string maps to exactly one label.
    pub fn classify(&self, text: &str) -> Sentiment {
        if contains_any(text, &self.rules.negative_roots) {
            Sentiment::Negative
        } else if contains_any(text, &self.rules.positive_roots) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }
}

fn contains_any(text: &str, roots: &[String]) -> bool {
    roots.iter().any(|root| text.contains(root.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_classifier() -> SentimentClassifier {
        SentimentClassifier::new(ClassifierConfig::default())
    }

    #[test]
    fn positive_root_classifies_positive() {
        let classifier = default_classifier();
        assert_eq!(classifier.classify("я люблю это"), Sentiment::Positive);
        assert_eq!(classifier.classify("хороший товар"), Sentiment::Positive);
    }

    #[test]
    fn negative_root_wins_over_positive() {
        let classifier = default_classifier();
        assert_eq!(classifier.classify("я ненавижу и люблю"), Sentiment::Negative);
        assert_eq!(classifier.classify("ненавижу"), Sentiment::Negative);
    }

    #[test]
    fn unmatched_text_is_neutral() {
        let classifier = default_classifier();
        assert_eq!(classifier.classify("это стол"), Sentiment::Neutral);
    }

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(default_classifier().classify(""), Sentiment::Neutral);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(default_classifier().classify("Я ЛЮБЛЮ ЭТО"), Sentiment::Neutral);
    }

    #[test]
    fn alternate_rule_set_is_honored() {
        let classifier = SentimentClassifier::new(ClassifierConfig {
            negative_roots: vec!["hate".to_string()],
            positive_roots: vec!["love".to_string(), "great".to_string()],
        });

        assert_eq!(classifier.classify("I love this"), Sentiment::Positive);
        assert_eq!(classifier.classify("love it but hate the price"), Sentiment::Negative);
        assert_eq!(classifier.classify("meh"), Sentiment::Neutral);
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Sentiment::Positive).unwrap(), "\"positive\"");
        assert_eq!("negative".parse::<Sentiment>().unwrap(), Sentiment::Negative);
        assert!("angry".parse::<Sentiment>().is_err());
    }
}
