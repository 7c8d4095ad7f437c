use crate::LexiconFilter;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use shared_states::Emotion;
use std::{
    collections::{BTreeSet, HashMap},
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_WORD_COLUMN: &str = "Czech Word";

const WORD_COLUMN_SUFFIX: &str = " word";
const BOM: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Lexicon input not found: {0}")]
    Missing(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed lexicon line {line}: {message}")]
    Malformed { line: u64, message: String },

    #[error("Lexicon header has no column named {0:?}")]
    MissingColumn(String),

    #[error("Lexicon names an unknown emotion: {0:?}")]
    UnknownEmotion(String),

    #[error("Lexicon {0} holds no emotion associations")]
    Empty(PathBuf),

    #[error("Malformed filter file {path}: {source}")]
    Filter {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type LexiconResult<T> = Result<T, LexiconError>;

/// Layout of the lexicon file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LexiconFormat {
    /// Header row with a word column and one `0`/`1` column per emotion.
    #[default]
    Wide,
    /// No header, one `word<TAB>emotion<TAB>0|1` association per line.
    Long,
}

impl FromStr for LexiconFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wide" => Ok(LexiconFormat::Wide),
            "long" => Ok(LexiconFormat::Long),
            other => Err(format!("unknown lexicon format {other:?}, expected wide or long")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexiconOptions {
    pub format: LexiconFormat,
    /// Header of the column holding the looked up word, wide format only.
    pub word_column: String,
}

impl Default for LexiconOptions {
    fn default() -> Self {
        Self {
            format: LexiconFormat::Wide,
            word_column: DEFAULT_WORD_COLUMN.to_string(),
        }
    }
}

/// Normalizes a lexicon word or phrase: trimmed, lowercase, single spaces between words.
pub fn normalize(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lexicon maps normalized words and phrases to the emotions they are associated with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: HashMap<String, BTreeSet<Emotion>>,
    emotions: BTreeSet<Emotion>,
    max_phrase_len: usize,
}

impl Lexicon {
    /// Loads a lexicon file.
    ///
    /// # Arguments
    /// * `path` - tab separated lexicon file.
    /// * `options` - file layout.
    ///
    /// # Returns
    /// * Non-empty lexicon or an error naming the offending line.
    pub fn load(path: &Path, options: &LexiconOptions) -> LexiconResult<Self> {
        Self::load_filtered(path, options, LexiconFilter::empty())
    }

    /// Loads a lexicon file, leaving out the words the filter ignores.
    pub fn load_filtered(
        path: &Path,
        options: &LexiconOptions,
        filter: &LexiconFilter,
    ) -> LexiconResult<Self> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LexiconError::Missing(path.to_path_buf()),
            _ => LexiconError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let lexicon = match options.format {
            LexiconFormat::Wide => Self::read_wide(file, &options.word_column, filter)?,
            LexiconFormat::Long => Self::read_long(file, filter)?,
        };

        if lexicon.is_empty() {
            return Err(LexiconError::Empty(path.to_path_buf()));
        }

        info!(
            "Loaded lexicon {} with {} entries over {} emotions",
            path.display(),
            lexicon.len(),
            lexicon.emotions.len()
        );

        Ok(lexicon)
    }

    fn read_wide<R: Read>(
        reader: R,
        word_column: &str,
        filter: &LexiconFilter,
    ) -> LexiconResult<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .from_reader(reader);

        let headers = reader.headers().map_err(malformed)?.clone();
        let header_name = |name: &str| name.trim_start_matches(BOM).trim().to_string();

        let word_index = headers
            .iter()
            .position(|name| header_name(name) == word_column.trim())
            .ok_or_else(|| LexiconError::MissingColumn(word_column.to_string()))?;

        let mut columns = Vec::new();
        for (index, name) in headers.iter().enumerate() {
            let name = header_name(name);
            if index == word_index || name.to_lowercase().ends_with(WORD_COLUMN_SUFFIX) {
                continue;
            }
            let emotion = name
                .parse::<Emotion>()
                .map_err(|_| LexiconError::UnknownEmotion(name.clone()))?;
            columns.push((index, emotion));
        }
        debug!("Lexicon emotion columns: {:?}", columns);

        let mut lexicon = Lexicon::default();
        for record in reader.records() {
            let record = record.map_err(malformed)?;
            let line = line_of(&record);
            let word = normalize(record.get(word_index).unwrap_or_default());

            for (index, emotion) in columns.iter() {
                if parse_flag(record.get(*index), line, *emotion)?
                    && !word.is_empty()
                    && !filter.is_ignored_word(&word)
                {
                    lexicon.insert(&word, *emotion);
                }
            }
        }

        Ok(lexicon)
    }

    fn read_long<R: Read>(reader: R, filter: &LexiconFilter) -> LexiconResult<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut lexicon = Lexicon::default();
        for record in reader.records() {
            let record = record.map_err(malformed)?;
            let line = line_of(&record);
            if record.len() != 3 {
                return Err(LexiconError::Malformed {
                    line,
                    message: format!("expected 3 fields, got {}", record.len()),
                });
            }

            let word = normalize(&record[0]);
            let emotion = record[1]
                .parse::<Emotion>()
                .map_err(|_| LexiconError::UnknownEmotion(record[1].trim().to_string()))?;

            if parse_flag(record.get(2), line, emotion)?
                && !word.is_empty()
                && !filter.is_ignored_word(&word)
            {
                lexicon.insert(&word, emotion);
            }
        }

        Ok(lexicon)
    }

    fn insert(&mut self, word: &str, emotion: Emotion) {
        self.emotions.insert(emotion);
        let phrase_len = word.split(' ').count();
        self.max_phrase_len = self.max_phrase_len.max(phrase_len);
        self.entries
            .entry(word.to_string())
            .or_default()
            .insert(emotion);
    }

    /// Emotions associated with the word or phrase, looked up after normalization.
    pub fn lookup(&self, word: &str) -> Option<&BTreeSet<Emotion>> {
        self.entries.get(&normalize(word))
    }

    /// Emotions associated with the word or phrase minus those the filter suppresses for it.
    pub fn emotions_for(&self, word: &str, filter: &LexiconFilter) -> Vec<Emotion> {
        let word = normalize(word);
        self.entries
            .get(&word)
            .map(|emotions| {
                emotions
                    .iter()
                    .copied()
                    .filter(|emotion| !filter.is_ignored(&word, *emotion))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Emotion categories the lexicon associates with at least one word.
    pub fn emotions(&self) -> &BTreeSet<Emotion> {
        &self.emotions
    }

    /// Word count of the longest entry.
    pub fn max_phrase_len(&self) -> usize {
        self.max_phrase_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<W, E> FromIterator<(W, E)> for Lexicon
where
    W: AsRef<str>,
    E: IntoIterator<Item = Emotion>,
{
    fn from_iter<I: IntoIterator<Item = (W, E)>>(iter: I) -> Self {
        let mut lexicon = Lexicon::default();
        for (word, emotions) in iter {
            let word = normalize(word.as_ref());
            if word.is_empty() {
                continue;
            }
            for emotion in emotions {
                lexicon.insert(&word, emotion);
            }
        }
        lexicon
    }
}

fn malformed(err: csv::Error) -> LexiconError {
    LexiconError::Malformed {
        line: err.position().map(|p| p.line()).unwrap_or_default(),
        message: err.to_string(),
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn parse_flag(value: Option<&str>, line: u64, emotion: Emotion) -> LexiconResult<bool> {
    match value.map(str::trim) {
        Some("1") => Ok(true),
        Some("0") => Ok(false),
        other => Err(LexiconError::Malformed {
            line,
            message: format!(
                "expected 0 or 1 for {emotion}, got {:?}",
                other.unwrap_or_default()
            ),
        }),
    }
}
