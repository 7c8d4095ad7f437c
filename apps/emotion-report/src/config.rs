use anyhow::{Context, Result, anyhow, bail};
use emolex::{DEFAULT_MIN_COUNT, DEFAULT_WORD_COLUMN, LexiconFormat, LexiconOptions};
use serde::{Deserialize, Serialize};
use shared_states::Emotion;
use std::{
    collections::{HashMap, HashSet},
    env,
    num::NonZeroUsize,
    path::PathBuf,
    str::FromStr,
};

const DEFAULT_OUTPUT_PATH: &str = "emotion_report.html";
const DEFAULT_TOP_WORDS: usize = 10;

/// GroupSource names a respondent group and the folder holding its transcripts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupSource {
    pub label: String,
    pub path: PathBuf,
}

impl FromStr for GroupSource {
    type Err = anyhow::Error;

    /// Parses `label=path`, or a bare `path` labelled by its folder name.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (label, path) = match s.split_once('=') {
            Some((label, path)) => (label.trim().to_string(), PathBuf::from(path.trim())),
            None => {
                let path = PathBuf::from(s);
                let label = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (label, path)
            }
        };
        if label.is_empty() || path.as_os_str().is_empty() {
            bail!("invalid group {s:?}, expected label=path or a folder path");
        }
        Ok(Self { label, path })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub groups: Vec<GroupSource>,
    pub lexicon_path: PathBuf,
    pub lexicon_format: LexiconFormat,
    pub word_column: String,
    pub lemma_table_path: Option<PathBuf>,
    pub filters_path: Option<PathBuf>,
    pub ngram_size: NonZeroUsize,
    pub output_path: PathBuf,
    pub top_words: usize,
    pub matrix_enabled: bool,
    pub matrix_min_count: u64,
    pub labels: HashMap<Emotion, String>,
}

impl ReportConfig {
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// # Arguments
    /// * `lookup` - returns the value of a variable, `None` when unset.
    ///
    /// # Returns
    /// * Configuration or an error naming the offending variable.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let groups = var("EMOTION_GROUPS")
            .context("EMOTION_GROUPS must be set")?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(GroupSource::from_str)
            .collect::<Result<Vec<_>>>()
            .context("EMOTION_GROUPS must list label=path entries")?;

        let lexicon_path = var("EMOTION_LEXICON_PATH")
            .map(PathBuf::from)
            .context("EMOTION_LEXICON_PATH must be set")?;

        let lexicon_format = match var("EMOTION_LEXICON_FORMAT") {
            Some(format) => format
                .parse::<LexiconFormat>()
                .map_err(|e| anyhow!("EMOTION_LEXICON_FORMAT is invalid: {e}"))?,
            None => LexiconFormat::default(),
        };

        let word_column =
            var("EMOTION_LEXICON_WORD_COLUMN").unwrap_or_else(|| DEFAULT_WORD_COLUMN.to_string());

        let ngram_size = match var("EMOTION_NGRAM_SIZE") {
            Some(size) => size
                .parse::<NonZeroUsize>()
                .context("EMOTION_NGRAM_SIZE must be a number greater than zero")?,
            None => NonZeroUsize::MIN,
        };

        let top_words = match var("EMOTION_TOP_WORDS") {
            Some(count) => count
                .parse()
                .context("EMOTION_TOP_WORDS must be a valid number")?,
            None => DEFAULT_TOP_WORDS,
        };

        let matrix_enabled = match var("EMOTION_MATRIX_ENABLED") {
            Some(flag) => {
                parse_flag(&flag).context("EMOTION_MATRIX_ENABLED must be true or false")?
            }
            None => false,
        };

        let matrix_min_count = match var("EMOTION_MATRIX_MIN_COUNT") {
            Some(count) => count
                .parse()
                .context("EMOTION_MATRIX_MIN_COUNT must be a valid number")?,
            None => DEFAULT_MIN_COUNT,
        };

        let labels = match var("EMOTION_LABELS") {
            Some(labels) => parse_labels(&labels).context("EMOTION_LABELS is invalid")?,
            None => HashMap::new(),
        };

        Ok(Self {
            groups,
            lexicon_path,
            lexicon_format,
            word_column,
            lemma_table_path: var("EMOTION_LEMMA_TABLE_PATH").map(PathBuf::from),
            filters_path: var("EMOTION_FILTERS_PATH").map(PathBuf::from),
            ngram_size,
            output_path: var("EMOTION_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            top_words,
            matrix_enabled,
            matrix_min_count,
            labels,
        })
    }

    /// Checks constraints spanning several variables.
    pub fn validate(&self) -> Result<()> {
        if self.groups.is_empty() {
            bail!("EMOTION_GROUPS must name at least one group");
        }
        let mut seen = HashSet::new();
        for group in self.groups.iter() {
            if !seen.insert(group.label.as_str()) {
                bail!("EMOTION_GROUPS lists group {} more than once", group.label);
            }
        }
        Ok(())
    }

    pub fn lexicon_options(&self) -> LexiconOptions {
        LexiconOptions {
            format: self.lexicon_format,
            word_column: self.word_column.clone(),
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unexpected flag value {other:?}"),
    }
}

fn parse_labels(value: &str) -> Result<HashMap<Emotion, String>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (emotion, label) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("expected emotion=label, got {pair:?}"))?;
            Ok((emotion.parse::<Emotion>()?, label.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn it_should_apply_defaults() -> anyhow::Result<()> {
        let config = ReportConfig::try_from_lookup(lookup(&[
            ("EMOTION_GROUPS", "bankers=data/bankeri, data/delnici"),
            ("EMOTION_LEXICON_PATH", "lexicon.tsv"),
        ]))?;
        config.validate()?;

        assert_eq!(
            config.groups,
            vec![
                GroupSource {
                    label: "bankers".to_owned(),
                    path: PathBuf::from("data/bankeri"),
                },
                GroupSource {
                    label: "delnici".to_owned(),
                    path: PathBuf::from("data/delnici"),
                },
            ]
        );
        assert_eq!(config.lexicon_format, LexiconFormat::Wide);
        assert_eq!(config.word_column, DEFAULT_WORD_COLUMN);
        assert_eq!(config.ngram_size.get(), 1);
        assert_eq!(config.output_path, PathBuf::from("emotion_report.html"));
        assert_eq!(config.top_words, 10);
        assert!(!config.matrix_enabled);
        assert_eq!(config.matrix_min_count, 6);
        assert!(config.labels.is_empty());
        assert!(config.lemma_table_path.is_none());
        Ok(())
    }

    #[test]
    fn it_should_parse_all_variables() -> anyhow::Result<()> {
        let config = ReportConfig::try_from_lookup(lookup(&[
            ("EMOTION_GROUPS", "a=x"),
            ("EMOTION_LEXICON_PATH", "lexicon.tsv"),
            ("EMOTION_LEXICON_FORMAT", "long"),
            ("EMOTION_NGRAM_SIZE", "2"),
            ("EMOTION_MATRIX_ENABLED", "true"),
            ("EMOTION_MATRIX_MIN_COUNT", "3"),
            ("EMOTION_LABELS", "joy=radost, Fear=strach"),
            ("EMOTION_FILTERS_PATH", "filters.json"),
        ]))?;

        assert_eq!(config.lexicon_format, LexiconFormat::Long);
        assert_eq!(config.ngram_size.get(), 2);
        assert!(config.matrix_enabled);
        assert_eq!(config.matrix_min_count, 3);
        assert_eq!(config.labels.get(&Emotion::Joy).map(String::as_str), Some("radost"));
        assert_eq!(config.labels.get(&Emotion::Fear).map(String::as_str), Some("strach"));
        assert_eq!(config.filters_path, Some(PathBuf::from("filters.json")));
        Ok(())
    }

    #[test]
    fn it_should_name_the_invalid_variable() {
        let base = [("EMOTION_GROUPS", "a=x"), ("EMOTION_LEXICON_PATH", "l.tsv")];

        let err = ReportConfig::try_from_lookup(lookup(&[base[0]])).unwrap_err();
        assert!(format!("{err:#}").contains("EMOTION_LEXICON_PATH"));

        let ngram = [base[0], base[1], ("EMOTION_NGRAM_SIZE", "0")];
        let err = ReportConfig::try_from_lookup(lookup(&ngram)).unwrap_err();
        assert!(format!("{err:#}").contains("EMOTION_NGRAM_SIZE"));

        let labels = [base[0], base[1], ("EMOTION_LABELS", "joyful=x")];
        let err = ReportConfig::try_from_lookup(lookup(&labels)).unwrap_err();
        assert!(format!("{err:#}").contains("EMOTION_LABELS"));
    }

    #[test]
    fn it_should_reject_duplicate_groups() -> anyhow::Result<()> {
        let config = ReportConfig::try_from_lookup(lookup(&[
            ("EMOTION_GROUPS", "a=x,a=y"),
            ("EMOTION_LEXICON_PATH", "lexicon.tsv"),
        ]))?;
        assert!(config.validate().is_err());
        Ok(())
    }
}
