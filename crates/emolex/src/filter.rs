use crate::{LexiconError, LexiconResult, normalize};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use shared_states::Emotion;
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fs, io,
    path::Path,
};
use tracing::info;

lazy_static! {
    static ref EMPTY: LexiconFilter = LexiconFilter::default();
}

/// LexiconFilter holds the manual corrections applied on top of the lexicon.
///
/// ```json
/// {
///     "ignored_words": ["pan"],
///     "ignored_emotions": { "dobrý": ["fear"] },
///     "stopwords": ["a", "se", "ten"]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LexiconFilter {
    /// Words that carry no emotion in the analysed transcripts.
    pub ignored_words: HashSet<String>,
    /// Emotions suppressed for particular words.
    pub ignored_emotions: HashMap<String, BTreeSet<Emotion>>,
    /// Words left out of n-gram co-occurrence counting.
    pub stopwords: HashSet<String>,
}

impl LexiconFilter {
    /// Filter that lets everything through.
    pub fn empty() -> &'static LexiconFilter {
        &EMPTY
    }

    /// Reads the filter from a JSON file; keys are normalized like lexicon words.
    pub fn from_json_file(path: &Path) -> LexiconResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LexiconError::Missing(path.to_path_buf()),
            _ => LexiconError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let filter: LexiconFilter =
            serde_json::from_str(&content).map_err(|source| LexiconError::Filter {
                path: path.to_path_buf(),
                source,
            })?;
        let filter = filter.normalized();

        info!(
            "Loaded filter {} with {} ignored words, {} emotion overrides and {} stopwords",
            path.display(),
            filter.ignored_words.len(),
            filter.ignored_emotions.len(),
            filter.stopwords.len()
        );

        Ok(filter)
    }

    fn normalized(self) -> Self {
        let mut ignored_emotions: HashMap<String, BTreeSet<Emotion>> = HashMap::new();
        for (word, emotions) in self.ignored_emotions {
            ignored_emotions
                .entry(normalize(&word))
                .or_default()
                .extend(emotions);
        }
        Self {
            ignored_words: self.ignored_words.iter().map(|w| normalize(w)).collect(),
            ignored_emotions,
            stopwords: self.stopwords.iter().map(|w| normalize(w)).collect(),
        }
    }

    /// Expects a normalized word.
    pub fn is_ignored_word(&self, word: &str) -> bool {
        self.ignored_words.contains(word)
    }

    /// Expects a normalized word.
    pub fn is_ignored(&self, word: &str, emotion: Emotion) -> bool {
        self.is_ignored_word(word)
            || self
                .ignored_emotions
                .get(word)
                .is_some_and(|emotions| emotions.contains(&emotion))
    }

    /// Expects a normalized word.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn it_should_read_and_normalize_filter() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("filter.json");
        fs::write(
            &path,
            r#"{"ignored_words": ["Pan"], "ignored_emotions": {"Dobrý": ["fear", "negative"]}}"#,
        )?;

        let filter = LexiconFilter::from_json_file(&path)?;
        assert!(filter.is_ignored_word("pan"));
        assert!(filter.is_ignored("dobrý", Emotion::Fear));
        assert!(!filter.is_ignored("dobrý", Emotion::Joy));
        assert!(filter.is_ignored("pan", Emotion::Joy));
        assert!(filter.stopwords.is_empty());
        Ok(())
    }

    #[test]
    fn it_should_reject_invalid_filter() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("filter.json");
        fs::write(&path, r#"{"ignored_emotions": {"dobrý": ["hope"]}}"#)?;
        assert!(matches!(
            LexiconFilter::from_json_file(&path),
            Err(LexiconError::Filter { .. })
        ));
        assert!(matches!(
            LexiconFilter::from_json_file(&dir.path().join("missing.json")),
            Err(LexiconError::Missing(_))
        ));
        Ok(())
    }
}
