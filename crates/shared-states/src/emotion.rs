use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Emotion represents one of the NRC EmoLex association categories.
///
/// Variants are declared in label order so the derived `Ord` sorts emotions alphabetically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Anticipation,
    Disgust,
    Fear,
    Joy,
    Negative,
    Positive,
    Sadness,
    Surprise,
    Trust,
}

/// Polarity groups emotions into the positive and the negative half of the lexicon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown emotion label: {0}")]
pub struct UnknownEmotion(pub String);

impl Emotion {
    pub const ALL: [Emotion; 10] = [
        Emotion::Anger,
        Emotion::Anticipation,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Negative,
        Emotion::Positive,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Trust,
    ];

    /// Emotions in matrix row order, the positive half first.
    pub const BY_POLARITY: [Emotion; 10] = [
        Emotion::Positive,
        Emotion::Joy,
        Emotion::Anticipation,
        Emotion::Surprise,
        Emotion::Trust,
        Emotion::Negative,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Disgust,
        Emotion::Fear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Anticipation => "anticipation",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Negative => "negative",
            Emotion::Positive => "positive",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
            Emotion::Trust => "trust",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Emotion::Positive
            | Emotion::Joy
            | Emotion::Anticipation
            | Emotion::Surprise
            | Emotion::Trust => Polarity::Positive,
            Emotion::Negative
            | Emotion::Anger
            | Emotion::Sadness
            | Emotion::Disgust
            | Emotion::Fear => Polarity::Negative,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.label() == label)
            .ok_or(UnknownEmotion(s.to_string()))
    }
}
