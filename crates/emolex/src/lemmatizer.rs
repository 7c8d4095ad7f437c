use crate::{Lemmatize, tokenizer::tokenize};
use csv::ReaderBuilder;
use shared_states::Token;
use std::{
    collections::HashMap,
    fs::File,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LemmaError {
    #[error("Lemma table not found: {0}")]
    Missing(PathBuf),

    #[error("Failed to read lemma table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed lemma table line {line}: {message}")]
    Malformed { line: u64, message: String },

    #[error("Lemma table {0} is empty")]
    Empty(PathBuf),
}

/// Lemmatizer that only case-folds word forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFoldLemmatizer;

impl Lemmatize for CaseFoldLemmatizer {
    fn lemmatize(&self, sentence: &str) -> Vec<Token> {
        tokenize(sentence)
            .into_iter()
            .map(|form| Token::new(form, &form.to_lowercase()))
            .collect()
    }
}

/// Dictionary lemmatizer backed by a `form<TAB>lemma` table.
///
/// Forms missing from the table lemmatize to their lowercase form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaTable {
    lemmas: HashMap<String, String>,
}

impl LemmaTable {
    /// Loads a tab separated table without header, `#` starts a comment line.
    /// Columns past the second are ignored.
    pub fn load(path: &Path) -> Result<Self, LemmaError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LemmaError::Missing(path.to_path_buf()),
            _ => LemmaError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .from_reader(file);

        let mut table = LemmaTable::default();
        for record in reader.records() {
            let record = record.map_err(|e| LemmaError::Malformed {
                line: e.position().map(|p| p.line()).unwrap_or_default(),
                message: e.to_string(),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let (Some(form), Some(lemma)) = (record.get(0), record.get(1)) else {
                return Err(LemmaError::Malformed {
                    line,
                    message: format!("expected form and lemma, got {} fields", record.len()),
                });
            };
            let (form, lemma) = (form.trim().to_lowercase(), lemma.trim().to_lowercase());
            if form.is_empty() || lemma.is_empty() {
                return Err(LemmaError::Malformed {
                    line,
                    message: "empty form or lemma".to_string(),
                });
            }
            table.lemmas.insert(form, lemma);
        }

        if table.is_empty() {
            return Err(LemmaError::Empty(path.to_path_buf()));
        }

        info!("Loaded {} lemma forms from {}", table.len(), path.display());

        Ok(table)
    }

    pub fn lemma(&self, form: &str) -> String {
        let form = form.to_lowercase();
        self.lemmas.get(&form).cloned().unwrap_or(form)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl<F, L> FromIterator<(F, L)> for LemmaTable
where
    F: AsRef<str>,
    L: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (F, L)>>(iter: I) -> Self {
        let lemmas = iter
            .into_iter()
            .map(|(form, lemma)| (form.as_ref().to_lowercase(), lemma.as_ref().to_lowercase()))
            .collect();
        Self { lemmas }
    }
}

impl Lemmatize for LemmaTable {
    fn lemmatize(&self, sentence: &str) -> Vec<Token> {
        tokenize(sentence)
            .into_iter()
            .map(|form| Token::new(form, &self.lemma(form)))
            .collect()
    }
}
