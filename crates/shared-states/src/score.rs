use crate::Emotion;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// EmotionCount maps each emotion to the number of times it was matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmotionCount(BTreeMap<Emotion, u64>);

impl EmotionCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, emotion: Emotion) {
        self.add(emotion, 1);
    }

    pub fn add(&mut self, emotion: Emotion, count: u64) {
        *self.0.entry(emotion).or_insert(0) += count;
    }

    /// Count for the emotion, zero when it was never matched.
    pub fn get(&self, emotion: Emotion) -> u64 {
        self.0.get(&emotion).copied().unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over matched emotions in label order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u64)> + '_ {
        self.0.iter().map(|(emotion, count)| (*emotion, *count))
    }

    pub fn merge(&mut self, other: &EmotionCount) {
        for (emotion, count) in other.iter() {
            self.add(emotion, count);
        }
    }
}

impl FromIterator<(Emotion, u64)> for EmotionCount {
    fn from_iter<I: IntoIterator<Item = (Emotion, u64)>>(iter: I) -> Self {
        let mut count = EmotionCount::new();
        for (emotion, n) in iter {
            count.add(emotion, n);
        }
        count
    }
}

/// GroupScore accumulates everything the scorer learns about one respondent group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupScore {
    pub group: String,
    /// Matches per emotion.
    pub counts: EmotionCount,
    /// Sentences containing at least one match per emotion.
    pub sentence_hits: EmotionCount,
    pub sentences: u64,
    pub tokens: u64,
    /// Matched lemma or phrase frequencies per emotion.
    pub words: BTreeMap<Emotion, HashMap<String, u64>>,
}

impl GroupScore {
    pub fn new(group: &str) -> Self {
        Self {
            group: group.to_string(),
            ..Default::default()
        }
    }

    pub fn record_match(&mut self, emotion: Emotion, word: &str) {
        self.counts.increment(emotion);
        *self
            .words
            .entry(emotion)
            .or_default()
            .entry(word.to_string())
            .or_insert(0) += 1;
    }

    /// Folds the score of another transcript of the same group into this one.
    pub fn absorb(&mut self, other: &GroupScore) {
        self.counts.merge(&other.counts);
        self.sentence_hits.merge(&other.sentence_hits);
        self.sentences += other.sentences;
        self.tokens += other.tokens;
        for (emotion, words) in other.words.iter() {
            let target = self.words.entry(*emotion).or_default();
            for (word, count) in words {
                *target.entry(word.clone()).or_insert(0) += count;
            }
        }
    }

    /// Share of sentences mentioning the emotion, zero for a group without sentences.
    pub fn sentence_ratio(&self, emotion: Emotion) -> f64 {
        if self.sentences == 0 {
            return 0.0;
        }
        self.sentence_hits.get(emotion) as f64 / self.sentences as f64
    }

    /// Most frequent words for the emotion, ties broken alphabetically.
    pub fn top_words(&self, emotion: Emotion, limit: usize) -> Vec<(String, u64)> {
        let mut words: Vec<(String, u64)> = self
            .words
            .get(&emotion)
            .map(|words| words.iter().map(|(w, c)| (w.clone(), *c)).collect())
            .unwrap_or_default();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(limit);
        words
    }
}
