use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Token is a single analysed word of a sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Token {
    pub form: String,
    pub lemma: String,
    pub upos: Option<String>,
}

impl Token {
    pub fn new(form: &str, lemma: &str) -> Self {
        Self {
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: None,
        }
    }
}

/// Sentence is either raw text awaiting lemmatization or a sequence of tokens
/// produced by an external linguistic pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sentence {
    Raw(String),
    Analyzed(Vec<Token>),
}

/// Transcript represents one interview of a respondent group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transcript {
    pub id: String,
    pub group: String,
    pub source: String,
    pub sentences: Vec<Sentence>,
}

impl Transcript {
    /// Creates a transcript whose id is derived from its group, source name and content.
    ///
    /// # Arguments
    /// * `group` - respondent group label.
    /// * `source` - file name the transcript was read from.
    /// * `content` - raw file content.
    /// * `sentences` - sentences parsed out of the content.
    pub fn new(group: &str, source: &str, content: &str, sentences: Vec<Sentence>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(group.as_bytes());
        hasher.update(source.as_bytes());
        hasher.update(content.as_bytes());
        let id = hex::encode(hasher.finalize());

        Self {
            id,
            group: group.to_string(),
            source: source.to_string(),
            sentences,
        }
    }

    /// Builds a transcript out of raw lines, one sentence per non-empty line.
    pub fn from_text(group: &str, source: &str, content: &str) -> Self {
        let sentences = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Sentence::Raw(line.to_string()))
            .collect();
        Self::new(group, source, content, sentences)
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
