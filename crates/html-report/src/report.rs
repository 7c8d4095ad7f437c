use serde::{Deserialize, Serialize};
use shared_states::{Emotion, EmotionCount, GroupScore};
use std::collections::BTreeSet;

/// ReportRow is one cell of the group by emotion count table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRow {
    pub group: String,
    pub emotion: Emotion,
    pub count: u64,
}

/// Report holds the aggregated counts, ordered by group then emotion label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    /// Group labels in listing order, each listed once.
    pub groups: Vec<String>,
    /// Emotion columns in label order.
    pub emotions: Vec<Emotion>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Builds a report from per-group counts.
    ///
    /// # Arguments
    /// * `groups` - group label and counts, in the order the groups should be listed. Counts of
    ///   a label seen before are added to that group.
    /// * `emotions` - emotion columns; emotions missing from a group's counts are reported as zero.
    ///
    /// # Returns
    /// * Report with one row per group and emotion.
    pub fn from_counts<'a, I>(groups: I, emotions: &[Emotion]) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a EmotionCount)>,
    {
        let emotions: Vec<Emotion> = emotions
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut labels: Vec<String> = Vec::new();
        let mut totals: Vec<EmotionCount> = Vec::new();
        for (group, counts) in groups {
            match labels.iter().position(|label| label == group) {
                Some(index) => totals[index].merge(counts),
                None => {
                    labels.push(group.to_string());
                    totals.push(counts.clone());
                }
            }
        }

        let rows = labels
            .iter()
            .zip(totals.iter())
            .flat_map(|(group, counts)| {
                emotions.iter().map(move |emotion| ReportRow {
                    group: group.clone(),
                    emotion: *emotion,
                    count: counts.get(*emotion),
                })
            })
            .collect();

        Self {
            groups: labels,
            emotions,
            rows,
        }
    }

    pub fn from_scores(scores: &[GroupScore], emotions: &[Emotion]) -> Self {
        Self::from_counts(
            scores.iter().map(|score| (score.group.as_str(), &score.counts)),
            emotions,
        )
    }

    pub fn count(&self, group: &str, emotion: Emotion) -> u64 {
        self.rows
            .iter()
            .find(|row| row.group == group && row.emotion == emotion)
            .map(|row| row.count)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_order_rows_by_group_then_emotion() {
        let bankers = EmotionCount::from_iter([(Emotion::Trust, 2), (Emotion::Anger, 1)]);
        let workers = EmotionCount::from_iter([(Emotion::Fear, 4)]);
        let report = Report::from_counts(
            [("workers", &workers), ("bankers", &bankers)],
            &[Emotion::Trust, Emotion::Fear, Emotion::Anger, Emotion::Fear],
        );

        assert_eq!(
            report.emotions,
            vec![Emotion::Anger, Emotion::Fear, Emotion::Trust]
        );
        assert_eq!(report.groups, vec!["workers", "bankers"]);
        let order: Vec<(&str, Emotion)> = report
            .rows
            .iter()
            .map(|row| (row.group.as_str(), row.emotion))
            .collect();
        assert_eq!(
            order,
            vec![
                ("workers", Emotion::Anger),
                ("workers", Emotion::Fear),
                ("workers", Emotion::Trust),
                ("bankers", Emotion::Anger),
                ("bankers", Emotion::Fear),
                ("bankers", Emotion::Trust),
            ]
        );
        assert_eq!(report.count("workers", Emotion::Fear), 4);
        assert_eq!(report.count("bankers", Emotion::Fear), 0);
    }

    #[test]
    fn it_should_merge_repeated_group_labels() {
        let first = EmotionCount::from_iter([(Emotion::Joy, 1)]);
        let other = EmotionCount::from_iter([(Emotion::Joy, 5)]);
        let second = EmotionCount::from_iter([(Emotion::Joy, 2), (Emotion::Fear, 1)]);
        let report = Report::from_counts(
            [("a", &first), ("b", &other), ("a", &second)],
            &[Emotion::Fear, Emotion::Joy],
        );

        assert_eq!(report.groups, vec!["a", "b"]);
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.count("a", Emotion::Joy), 3);
        assert_eq!(report.count("a", Emotion::Fear), 1);
        assert_eq!(report.count("b", Emotion::Joy), 5);
    }

    #[test]
    fn it_should_keep_groups_without_emotion_columns() {
        let counts = EmotionCount::from_iter([(Emotion::Joy, 3)]);
        let report = Report::from_counts([("a", &counts), ("b", &counts)], &[]);

        assert_eq!(report.groups, vec!["a", "b"]);
        assert!(report.rows.is_empty());
    }

    #[test]
    fn it_should_be_reproducible() {
        let counts = EmotionCount::from_iter([(Emotion::Joy, 3)]);
        let build = || Report::from_counts([("a", &counts), ("b", &counts)], &Emotion::ALL);
        assert_eq!(build(), build());
    }
}
