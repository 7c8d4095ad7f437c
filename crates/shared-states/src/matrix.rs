use crate::Emotion;
use serde::{Deserialize, Serialize};

/// EmotionMatrix holds n-gram frequencies per emotion, one row per emotion and one column per n-gram.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmotionMatrix {
    pub rows: Vec<Emotion>,
    pub columns: Vec<String>,
    /// Row-major cells, `cells[row][column]`.
    pub cells: Vec<Vec<u64>>,
}

impl EmotionMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn max(&self) -> u64 {
        self.cells
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or_default()
    }

    pub fn get(&self, emotion: Emotion, column: &str) -> Option<u64> {
        let row = self.rows.iter().position(|e| *e == emotion)?;
        let col = self.columns.iter().position(|c| c == column)?;
        self.cells.get(row)?.get(col).copied()
    }
}
