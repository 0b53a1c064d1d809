use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::stats::SummaryRow;

/// Timing samples for one executable under the current flag set.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecRuns {
    pub name: String,
    pub samples: Vec<f64>,
}

/// One `=== Building with ... ===` section: executables in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagRuns {
    pub flag_set: String,
    pub executables: Vec<ExecRuns>,
}

impl FlagRuns {
    /// Samples bucket for `name`, appended on first sight to keep log order.
    pub fn exec_entry(&mut self, name: &str) -> &mut ExecRuns {
        if let Some(pos) = self.executables.iter().position(|e| e.name == name) {
            return &mut self.executables[pos];
        }
        self.executables.push(ExecRuns {
            name: name.to_string(),
            samples: Vec::new(),
        });
        self.executables.last_mut().unwrap()
    }
}

/// Parsed consolidated Sobel run log, flag sets in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SobelRuns {
    pub flags: Vec<FlagRuns>,
}

impl SobelRuns {
    /// Index of the group for `flag_set`, creating it on first sight.
    pub fn flag_index(&mut self, flag_set: &str) -> usize {
        if let Some(pos) = self.flags.iter().position(|f| f.flag_set == flag_set) {
            return pos;
        }
        self.flags.push(FlagRuns {
            flag_set: flag_set.to_string(),
            executables: Vec::new(),
        });
        self.flags.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// One `name: avg ± std seconds` line from a saved summary file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecSummary {
    pub name: String,
    pub avg: f64,
    pub std: f64,
}

/// A labelled section of a saved summary file (e.g. `Standard Executables:`).
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySection {
    pub label: String,
    pub entries: Vec<ExecSummary>,
}

/// Parsed `execution_times.txt`, sections in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SobelSummaryFile {
    pub sections: Vec<SummarySection>,
}

impl SobelSummaryFile {
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.entries.is_empty())
    }
}

/// Aggregated statistics for one executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRow {
    pub executable: String,
    #[serde(flatten)]
    pub row: SummaryRow,
}

/// All rows for one flag set; the first row is the speedup baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagSection {
    pub flag_set: String,
    pub rows: Vec<VariantRow>,
}

/// Aggregated Sobel lab report.
///
/// `table[variant][flag]` holds the average for that cell, `None` where an
/// executable never ran under a flag set so charts can leave a gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SobelReport {
    pub timestamp_utc: String,
    pub flag_sections: Vec<FlagSection>,
    pub variants: Vec<String>,
    pub table: Vec<Vec<Option<f64>>>,
}

/// Aggregated statistics for one thread count of the k-means sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub threads: u32,
    pub samples: Vec<f64>,
    #[serde(flatten)]
    pub row: SummaryRow,
}

/// Aggregated k-means lab report, rows in ascending thread order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KmeansReport {
    pub timestamp_utc: String,
    pub seq_avg: f64,
    pub rows: Vec<ThreadSummary>,
}

/// RFC 3339 timestamp for saved reports.
pub fn utc_timestamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
