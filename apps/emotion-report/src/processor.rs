use crate::config::ReportConfig;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use emolex::{
    CaseFoldLemmatizer, EmotionScorer, LemmaTable, Lemmatize, Lexicon, LexiconFilter,
    NgramCooccurrence,
};
use html_report::{ReportOptions, render_document};
use indicatif::{ProgressBar, ProgressStyle};
use shared_states::{Emotion, EmotionMatrix, GroupScore, Transcript, load_group};
use std::{fs, path::PathBuf};
use tracing::{debug, info};

/// RunSummary describes a finished run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub scores: Vec<GroupScore>,
    pub emotions: Vec<Emotion>,
    pub transcripts: usize,
    /// N-gram column count of each group's matrix, empty when the matrix is disabled.
    pub matrix_columns: Vec<(String, usize)>,
    pub output_path: PathBuf,
}

/// Processor runs the whole analysis: load, score, render, write.
pub struct Processor {
    config: ReportConfig,
}

impl Processor {
    /// Create a new instance of the processor.
    ///
    /// # Arguments
    /// * `config` - validated run configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Run the processor.
    ///
    /// All inputs are loaded before scoring starts and the report is written only when every
    /// step succeeded, so a failed run leaves no output behind.
    ///
    /// # Returns
    /// A summary of the run or the first error met.
    pub fn run(&self) -> Result<RunSummary> {
        let config = &self.config;

        let filter = match &config.filters_path {
            Some(path) => LexiconFilter::from_json_file(path)
                .with_context(|| format!("Failed to load filters from {}", path.display()))?,
            None => LexiconFilter::default(),
        };

        let lexicon_path = &config.lexicon_path;
        let lexicon = Lexicon::load_filtered(lexicon_path, &config.lexicon_options(), &filter)
            .with_context(|| format!("Failed to load lexicon from {}", lexicon_path.display()))?;
        if config.ngram_size.get() > lexicon.max_phrase_len() {
            bail!(
                "EMOTION_NGRAM_SIZE is {} but the longest entry of lexicon {} has {} words",
                config.ngram_size,
                lexicon_path.display(),
                lexicon.max_phrase_len()
            );
        }

        let lemmatizer: Box<dyn Lemmatize> = match &config.lemma_table_path {
            Some(path) => {
                let table = LemmaTable::load(path).with_context(|| {
                    format!("Failed to load lemma table from {}", path.display())
                })?;
                info!("Loaded lemma table with {} forms", table.len());
                Box::new(table)
            }
            None => Box::new(CaseFoldLemmatizer),
        };

        let mut groups: Vec<(&str, Vec<Transcript>)> = Vec::with_capacity(config.groups.len());
        for group in config.groups.iter() {
            let transcripts = load_group(&group.label, &group.path)
                .with_context(|| format!("Failed to load group {}", group.label))?;
            groups.push((group.label.as_str(), transcripts));
        }
        let transcripts: usize = groups.iter().map(|(_, t)| t.len()).sum();

        let progress = ProgressBar::new(transcripts as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{msg:>12} [{bar:40}] {pos}/{len} transcripts")
                .progress_chars("=> "),
        );

        let scorer =
            EmotionScorer::new(&lexicon, &*lemmatizer, config.ngram_size).with_filter(&filter);

        let mut scores = Vec::with_capacity(groups.len());
        let mut matrices: Vec<(String, EmotionMatrix)> = Vec::new();
        for (label, transcripts) in groups.iter() {
            progress.set_message(label.to_string());
            let mut score = GroupScore::new(label);
            let mut cooccurrence = config
                .matrix_enabled
                .then(|| NgramCooccurrence::new(&lexicon, &*lemmatizer).with_filter(&filter));
            for transcript in transcripts {
                score.absorb(&scorer.score_transcript(transcript));
                if let Some(cooccurrence) = cooccurrence.as_mut() {
                    cooccurrence.observe(transcript);
                }
                progress.inc(1);
            }
            info!(
                "Scored group {}: {} sentences, {} tokens, {} matches",
                label,
                score.sentences,
                score.tokens,
                score.counts.total()
            );
            scores.push(score);

            if let Some(cooccurrence) = cooccurrence {
                let matrix = cooccurrence.matrix(config.matrix_min_count);
                debug!(
                    "Matrix of group {}: {} emotions by {} n-grams",
                    label,
                    matrix.rows.len(),
                    matrix.columns.len()
                );
                matrices.push((label.to_string(), matrix));
            }
        }
        progress.finish_and_clear();

        let emotions: Vec<Emotion> = lexicon.emotions().iter().copied().collect();
        let options = ReportOptions {
            labels: config.labels.clone(),
            top_words: config.top_words,
            generated_at: Some(Utc::now()),
            ..Default::default()
        };
        let html = render_document(&scores, &emotions, &matrices, &options);

        fs::write(&config.output_path, html).with_context(|| {
            format!("Failed to write report to {}", config.output_path.display())
        })?;
        info!("Report written to {}", config.output_path.display());

        Ok(RunSummary {
            scores,
            emotions,
            transcripts,
            matrix_columns: matrices
                .iter()
                .map(|(label, matrix)| (label.clone(), matrix.columns.len()))
                .collect(),
            output_path: config.output_path.clone(),
        })
    }
}
