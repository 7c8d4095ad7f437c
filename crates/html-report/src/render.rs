use crate::{Report, escape_html};
use chrono::{DateTime, Utc};
use shared_states::{Emotion, EmotionMatrix, GroupScore, Polarity};
use std::collections::HashMap;
use tracing::debug;

const STYLE: &str = "body { font-family: sans-serif; margin: 2em; }\n\
table { border-collapse: collapse; margin-bottom: 2em; }\n\
th, td { border: 1px solid #999; padding: 0.3em 0.6em; text-align: right; }\n\
th:first-child, td:first-child { text-align: left; }\n\
caption { font-weight: bold; text-align: left; padding: 0.3em 0; }";

const POSITIVE_RGB: &str = "0,128,0";
const NEGATIVE_RGB: &str = "255,0,0";

/// ReportOptions controls presentation of the rendered report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    /// Column headings replacing the English emotion labels.
    pub labels: HashMap<Emotion, String>,
    /// Words listed per emotion and group, zero disables the listing.
    pub top_words: usize,
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Emotion analysis".to_string(),
            labels: HashMap::new(),
            top_words: 10,
            generated_at: None,
        }
    }
}

impl ReportOptions {
    fn heading(&self, emotion: Emotion) -> String {
        let label = self
            .labels
            .get(&emotion)
            .map(String::as_str)
            .unwrap_or(emotion.label());
        escape_html(label)
    }
}

/// Renders the report as an HTML document holding a single count table.
///
/// # Arguments
/// * `report` - aggregated counts.
/// * `options` - presentation options.
///
/// # Returns
/// * HTML document, identical for identical input.
pub fn render(report: &Report, options: &ReportOptions) -> String {
    let mut html = open_document(options);
    html.push_str(&count_table(report, options));
    html.push_str(&close_document());
    html
}

/// Renders the full analysis document.
///
/// Besides the count table it holds the sentence share table, the most frequent words per
/// emotion of every group, and one emotion by n-gram matrix per group in `matrices`.
pub fn render_document(
    scores: &[GroupScore],
    emotions: &[Emotion],
    matrices: &[(String, EmotionMatrix)],
    options: &ReportOptions,
) -> String {
    let report = Report::from_scores(scores, emotions);

    let mut html = open_document(options);
    html.push_str(&count_table(&report, options));
    html.push_str(&share_table(scores, &report.emotions, options));
    if options.top_words > 0 {
        for score in scores {
            html.push_str(&top_words_table(score, &report.emotions, options));
        }
    }
    for (group, matrix) in matrices.iter() {
        if !matrix.is_empty() {
            html.push_str(&matrix_table(group, matrix, options));
        }
    }
    html.push_str(&close_document());

    debug!(
        "Rendered report with {} groups, {} bytes",
        scores.len(),
        html.len()
    );

    html
}

fn open_document(options: &ReportOptions) -> String {
    let title = escape_html(&options.title);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );
    if let Some(generated_at) = options.generated_at {
        html.push_str(&format!(
            "<p>Generated {}</p>\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    html
}

fn close_document() -> String {
    "</body>\n</html>\n".to_string()
}

fn header_row(first: &str, emotions: &[Emotion], options: &ReportOptions) -> String {
    let mut row = format!("<tr><th>{}</th>", escape_html(first));
    for emotion in emotions {
        row.push_str(&format!("<th>{}</th>", options.heading(*emotion)));
    }
    row.push_str("</tr>\n");
    row
}

fn count_table(report: &Report, options: &ReportOptions) -> String {
    let mut table = String::from("<table class=\"counts\">\n<caption>Emotion matches</caption>\n");
    table.push_str(&header_row("Group", &report.emotions, options));
    for group in report.groups.iter() {
        table.push_str(&format!("<tr><td>{}</td>", escape_html(group)));
        for emotion in report.emotions.iter() {
            table.push_str(&format!("<td>{}</td>", report.count(group, *emotion)));
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</table>\n");
    table
}

fn share_table(scores: &[GroupScore], emotions: &[Emotion], options: &ReportOptions) -> String {
    let mut table = String::from(
        "<table class=\"shares\">\n<caption>Share of sentences mentioning the emotion</caption>\n",
    );
    table.push_str(&header_row("Group (sentences)", emotions, options));
    for score in scores {
        table.push_str(&format!(
            "<tr><td>{} ({})</td>",
            escape_html(&score.group),
            score.sentences
        ));
        for emotion in emotions {
            table.push_str(&format!("<td>{:.3}</td>", score.sentence_ratio(*emotion)));
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</table>\n");
    table
}

fn top_words_table(score: &GroupScore, emotions: &[Emotion], options: &ReportOptions) -> String {
    let mut table = format!(
        "<table class=\"words\">\n<caption>Top words: {}</caption>\n<tr><th>Emotion</th><th>Matches</th><th>Words</th></tr>\n",
        escape_html(&score.group)
    );
    for emotion in emotions {
        let words = score
            .top_words(*emotion, options.top_words)
            .into_iter()
            .map(|(word, count)| format!("{} ({count})", escape_html(&word)))
            .collect::<Vec<_>>()
            .join(", ");
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            options.heading(*emotion),
            score.counts.get(*emotion),
            words
        ));
    }
    table.push_str("</table>\n");
    table
}

fn matrix_table(group: &str, matrix: &EmotionMatrix, options: &ReportOptions) -> String {
    let max = matrix.max().max(1) as f64;
    let mut table = format!(
        "<table class=\"matrix\">\n<caption>Emotion by n-gram matrix: {}</caption>\n<tr><th></th>",
        escape_html(group)
    );
    for column in matrix.columns.iter() {
        table.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    table.push_str("</tr>\n");

    for (emotion, cells) in matrix.rows.iter().zip(matrix.cells.iter()) {
        let rgb = match emotion.polarity() {
            Polarity::Positive => POSITIVE_RGB,
            Polarity::Negative => NEGATIVE_RGB,
        };
        table.push_str(&format!("<tr><th>{}</th>", options.heading(*emotion)));
        for value in cells {
            if *value > 0 {
                let alpha = *value as f64 / max;
                table.push_str(&format!(
                    "<td style=\"background-color: rgba({rgb},{alpha:.3});\">{value}</td>"
                ));
            } else {
                table.push_str("<td>0</td>");
            }
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</table>\n");
    table
}
