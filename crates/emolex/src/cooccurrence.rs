use crate::{
    Lemmatize, Lexicon, LexiconFilter, ngrams,
    tokenizer::{is_segment_break, is_word, split_segments},
};
use shared_states::{Emotion, EmotionMatrix, Sentence, Transcript};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

pub const DEFAULT_MIN_COUNT: u64 = 6;
pub const DEFAULT_MAX_NGRAM: usize = 3;

/// NgramCooccurrence counts which n-grams appear in clause segments that evoke an emotion.
///
/// Every segment contributes its content unigrams, bigrams and trigrams (up to the configured
/// maximum) to each emotion any of its lemmas is associated with.
pub struct NgramCooccurrence<'a> {
    lexicon: &'a Lexicon,
    lemmatizer: &'a dyn Lemmatize,
    filter: &'a LexiconFilter,
    max_ngram: usize,
    counts: BTreeMap<Emotion, HashMap<String, u64>>,
}

impl<'a> NgramCooccurrence<'a> {
    pub fn new(lexicon: &'a Lexicon, lemmatizer: &'a dyn Lemmatize) -> Self {
        Self {
            lexicon,
            lemmatizer,
            filter: LexiconFilter::empty(),
            max_ngram: DEFAULT_MAX_NGRAM,
            counts: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, filter: &'a LexiconFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram;
        self
    }

    pub fn observe(&mut self, transcript: &Transcript) {
        for sentence in transcript.sentences.iter() {
            self.observe_sentence(sentence);
        }
    }

    pub fn observe_sentence(&mut self, sentence: &Sentence) {
        for segment in self.segments(sentence) {
            self.observe_segment(&segment);
        }
    }

    fn segments(&self, sentence: &Sentence) -> Vec<Vec<String>> {
        let lowercase = |lemma: &str| lemma.to_lowercase();
        match sentence {
            Sentence::Raw(text) => split_segments(text)
                .into_iter()
                .map(|segment| {
                    self.lemmatizer
                        .lemmatize(segment)
                        .iter()
                        .map(|token| lowercase(&token.lemma))
                        .collect::<Vec<_>>()
                })
                .collect(),
            Sentence::Analyzed(tokens) => tokens
                .split(|token| is_segment_break(&token.form))
                .filter(|segment| !segment.is_empty())
                .map(|segment| segment.iter().map(|token| lowercase(&token.lemma)).collect())
                .collect(),
        }
    }

    fn observe_segment(&mut self, lemmas: &[String]) {
        let lemmas: Vec<&String> = lemmas
            .iter()
            .filter(|lemma| !self.filter.is_stopword(lemma))
            .collect();

        let mut evoked = BTreeSet::new();
        for lemma in lemmas.iter() {
            evoked.extend(self.lexicon.emotions_for(lemma, self.filter));
        }
        if evoked.is_empty() {
            return;
        }

        let content: Vec<&str> = lemmas
            .iter()
            .map(|lemma| lemma.as_str())
            .filter(|lemma| is_word(lemma))
            .collect();

        for emotion in evoked {
            let counter = self.counts.entry(emotion).or_default();
            for n in 1..=self.max_ngram {
                for window in ngrams(&content, n) {
                    *counter.entry(window.join(" ")).or_insert(0) += 1;
                }
            }
        }
    }

    /// Raw n-gram counts per evoked emotion.
    pub fn counts(&self) -> &BTreeMap<Emotion, HashMap<String, u64>> {
        &self.counts
    }

    /// Builds the emotion by n-gram matrix.
    ///
    /// Columns are the n-grams counted more than `min_count` times for at least one emotion,
    /// in lexicographic order. Rows are the evoked emotions, positive polarity first.
    pub fn matrix(&self, min_count: u64) -> EmotionMatrix {
        let columns: Vec<String> = self
            .counts
            .values()
            .flat_map(|counter| {
                counter
                    .iter()
                    .filter(|(_, count)| **count > min_count)
                    .map(|(ngram, _)| ngram.clone())
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows: Vec<Emotion> = Emotion::BY_POLARITY
            .into_iter()
            .filter(|emotion| self.counts.contains_key(emotion))
            .collect();

        let cells = rows
            .iter()
            .map(|emotion| {
                let counter = &self.counts[emotion];
                columns
                    .iter()
                    .map(|ngram| counter.get(ngram).copied().unwrap_or_default())
                    .collect()
            })
            .collect();

        debug!(
            "Built emotion matrix with {} rows and {} columns",
            rows.len(),
            columns.len()
        );

        EmotionMatrix {
            rows,
            columns,
            cells,
        }
    }
}
