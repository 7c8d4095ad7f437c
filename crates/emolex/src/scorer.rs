use crate::{CaseFoldLemmatizer, Lemmatize, Lexicon, LexiconFilter, tokenizer::is_word};
use shared_states::{Emotion, EmotionCount, GroupScore, Sentence, Transcript};
use std::{collections::BTreeSet, num::NonZeroUsize};
use tracing::debug;

/// Yields every window of `n` consecutive tokens, overlapping windows included.
///
/// Nothing is yielded for `n == 0` or when there are fewer than `n` tokens.
pub fn ngrams<T>(tokens: &[T], n: usize) -> impl Iterator<Item = &[T]> {
    let windows = (n > 0).then(|| tokens.windows(n));
    windows.into_iter().flatten()
}

/// Lowercase word lemmas of a sentence; punctuation and numbers are dropped.
pub fn sentence_lemmas(sentence: &Sentence, lemmatizer: &dyn Lemmatize) -> Vec<String> {
    let lemmas = match sentence {
        Sentence::Raw(text) => lemmatizer
            .lemmatize(text)
            .into_iter()
            .map(|token| token.lemma.to_lowercase())
            .collect::<Vec<_>>(),
        Sentence::Analyzed(tokens) => tokens
            .iter()
            .map(|token| token.lemma.to_lowercase())
            .collect(),
    };
    lemmas.into_iter().filter(|lemma| is_word(lemma)).collect()
}

/// EmotionScorer counts lexicon matches of transcript lemmas.
///
/// With an n-gram size of one every lemma is looked up on its own, with a larger size
/// every window of that many consecutive lemmas of a sentence is looked up as a phrase.
pub struct EmotionScorer<'a> {
    lexicon: &'a Lexicon,
    lemmatizer: &'a dyn Lemmatize,
    filter: &'a LexiconFilter,
    ngram_size: NonZeroUsize,
}

impl<'a> EmotionScorer<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        lemmatizer: &'a dyn Lemmatize,
        ngram_size: NonZeroUsize,
    ) -> Self {
        Self {
            lexicon,
            lemmatizer,
            filter: LexiconFilter::empty(),
            ngram_size,
        }
    }

    pub fn with_filter(mut self, filter: &'a LexiconFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Scores one transcript.
    ///
    /// # Arguments
    /// * `transcript` - transcript to scan.
    ///
    /// # Returns
    /// * Score attributed to the transcript's group.
    pub fn score_transcript(&self, transcript: &Transcript) -> GroupScore {
        let mut score = GroupScore::new(&transcript.group);
        for sentence in transcript.sentences.iter() {
            self.score_sentence(sentence, &mut score);
        }

        debug!(
            "Scored transcript {} ({}): {} sentences, {} tokens, {} matches",
            transcript.source,
            transcript.id,
            score.sentences,
            score.tokens,
            score.counts.total()
        );

        score
    }

    /// Scores all transcripts of a group into a single score.
    pub fn score_group(&self, group: &str, transcripts: &[Transcript]) -> GroupScore {
        let mut score = GroupScore::new(group);
        for transcript in transcripts {
            score.absorb(&self.score_transcript(transcript));
        }
        score
    }

    fn score_sentence(&self, sentence: &Sentence, score: &mut GroupScore) {
        let lemmas = sentence_lemmas(sentence, self.lemmatizer);
        score.sentences += 1;
        score.tokens += lemmas.len() as u64;

        let mut evoked: BTreeSet<Emotion> = BTreeSet::new();
        for window in ngrams(&lemmas, self.ngram_size.get()) {
            let key = window.join(" ");
            for emotion in self.lexicon.emotions_for(&key, self.filter) {
                score.record_match(emotion, &key);
                evoked.insert(emotion);
            }
        }

        for emotion in evoked {
            score.sentence_hits.increment(emotion);
        }
    }
}

/// Scores a transcript with a case folding lemmatizer and no filter.
///
/// # Arguments
/// * `transcript` - transcript to scan.
/// * `lexicon` - emotion lexicon.
/// * `n` - n-gram window size.
///
/// # Returns
/// * Matches per emotion.
pub fn score(transcript: &Transcript, lexicon: &Lexicon, n: NonZeroUsize) -> EmotionCount {
    EmotionScorer::new(lexicon, &CaseFoldLemmatizer, n)
        .score_transcript(transcript)
        .counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LemmaTable;
    use shared_states::Token;
    use std::collections::{HashMap, HashSet};

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn analyzed(group: &str, lemmas: &[&str]) -> Transcript {
        let tokens = lemmas.iter().map(|l| Token::new(l, l)).collect();
        Transcript::new(
            group,
            "t.conllu",
            &lemmas.join(" "),
            vec![Sentence::Analyzed(tokens)],
        )
    }

    fn lexicon() -> Lexicon {
        [
            ("happy", vec![Emotion::Joy]),
            ("sad", vec![Emotion::Sadness]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn it_should_produce_overlapping_windows() {
        let tokens = ["a", "b", "c"];
        let windows: Vec<&[&str]> = ngrams(&tokens, 2).collect();
        assert_eq!(windows, vec![&["a", "b"][..], &["b", "c"][..]]);
        assert_eq!(ngrams(&tokens[..1], 2).count(), 0);
        assert_eq!(ngrams(&tokens, 0).count(), 0);
        assert_eq!(ngrams::<&str>(&[], 1).count(), 0);
    }

    #[test]
    fn it_should_score_unigrams() {
        let transcript = analyzed("bankers", &["happy", "day", "sad"]);
        let counts = score(&transcript, &lexicon(), size(1));
        assert_eq!(
            counts,
            EmotionCount::from_iter([(Emotion::Joy, 1), (Emotion::Sadness, 1)])
        );
    }

    #[test]
    fn it_should_score_raw_text_case_insensitively() {
        let transcript =
            Transcript::from_text("bankers", "a.txt", "Happy day, SAD night.\nhappy");
        let scored = EmotionScorer::new(&lexicon(), &CaseFoldLemmatizer, size(1))
            .score_transcript(&transcript);
        assert_eq!(scored.counts.get(Emotion::Joy), 2);
        assert_eq!(scored.counts.get(Emotion::Sadness), 1);
        assert_eq!(scored.sentences, 2);
        assert_eq!(scored.tokens, 5);
        assert_eq!(scored.sentence_hits.get(Emotion::Joy), 2);
        assert_eq!(scored.sentence_hits.get(Emotion::Sadness), 1);
        assert_eq!(scored.group, "bankers");
    }

    #[test]
    fn it_should_score_through_lemma_table() {
        let lexicon: Lexicon = [("strach", vec![Emotion::Fear, Emotion::Negative])]
            .into_iter()
            .collect();
        let table: LemmaTable = [("strachu", "strach")].into_iter().collect();
        let transcript = Transcript::from_text("workers", "a.txt", "Měli jsme hodně strachu");
        let scored = EmotionScorer::new(&lexicon, &table, size(1)).score_transcript(&transcript);
        assert_eq!(scored.counts.get(Emotion::Fear), 1);
        assert_eq!(
            scored.top_words(Emotion::Fear, 1),
            vec![("strach".to_owned(), 1)]
        );
    }

    #[test]
    fn it_should_score_phrases_in_ngram_mode() {
        let lexicon: Lexicon = [
            ("dát se do pláče", vec![Emotion::Sadness]),
            ("velký strach", vec![Emotion::Fear]),
            ("strach", vec![Emotion::Fear]),
        ]
        .into_iter()
        .collect();
        let transcript = analyzed("workers", &["velký", "strach", "velký", "strach"]);

        let bigrams = score(&transcript, &lexicon, size(2));
        assert_eq!(bigrams.get(Emotion::Fear), 2);

        let phrase = analyzed("workers", &["dát", "se", "do", "pláče"]);
        let four = score(&phrase, &lexicon, size(4));
        assert_eq!(four.get(Emotion::Sadness), 1);

        let short = score(&analyzed("workers", &["strach"]), &lexicon, size(2));
        assert!(short.is_empty());
    }

    #[test]
    fn it_should_not_exceed_token_count() {
        let lexicon: Lexicon = [("a", vec![Emotion::Joy]), ("a a", vec![Emotion::Joy])]
            .into_iter()
            .collect();
        for n in 1..4 {
            let transcript = analyzed("g", &["a", "a", "a", "b"]);
            let scored = EmotionScorer::new(&lexicon, &CaseFoldLemmatizer, size(n))
                .score_transcript(&transcript);
            for (_, count) in scored.counts.iter() {
                assert!(count <= scored.tokens);
            }
        }
    }

    #[test]
    fn it_should_only_count_lexicon_emotions_and_honour_filter() {
        let lexicon: Lexicon = [("dobrý", vec![Emotion::Joy, Emotion::Fear])]
            .into_iter()
            .collect();
        let filter = LexiconFilter {
            ignored_emotions: HashMap::from([(
                "dobrý".to_owned(),
                BTreeSet::from([Emotion::Fear]),
            )]),
            stopwords: HashSet::new(),
            ..Default::default()
        };
        let transcript = analyzed("g", &["dobrý", "den", "1989"]);
        let scored = EmotionScorer::new(&lexicon, &CaseFoldLemmatizer, size(1))
            .with_filter(&filter)
            .score_transcript(&transcript);
        assert_eq!(scored.counts, EmotionCount::from_iter([(Emotion::Joy, 1)]));
        assert_eq!(scored.tokens, 2);
    }

    #[test]
    fn it_should_merge_group_transcripts() {
        let lexicon = lexicon();
        let scorer = EmotionScorer::new(&lexicon, &CaseFoldLemmatizer, size(1));
        let transcripts = vec![
            analyzed("bankers", &["happy"]),
            analyzed("bankers", &["happy", "sad"]),
        ];
        let scored = scorer.score_group("bankers", &transcripts);
        assert_eq!(scored.counts.get(Emotion::Joy), 2);
        assert_eq!(scored.sentences, 2);
        assert_eq!(scored.tokens, 3);
    }
}
