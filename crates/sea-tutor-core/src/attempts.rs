//! Attempt logging.
//!
//! Every checked answer becomes one [`AttemptRecord`]. Sinks are
//! append-only; the JSON-lines log can be read back for statistics.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One learner attempt at one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
    pub question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<String>,
    pub entered_answer: String,
    pub is_correct: bool,
    /// 1 for the first try at this question, 2 for the second, ...
    #[serde(default = "default_attempt")]
    pub attempt_count: u32,
    /// Highest hint level opened before answering (0 = none).
    #[serde(default)]
    pub hint_level_used: u32,
    #[serde(default)]
    pub used_example: bool,
    #[serde(default)]
    pub used_tutor: bool,
    #[serde(default)]
    pub used_show_step: bool,
    #[serde(default)]
    pub used_reveal_solution: bool,
    #[serde(default)]
    pub time_spent_sec: u32,
    pub recorded_at: DateTime<Utc>,
}

fn default_attempt() -> u32 {
    1
}

impl AttemptRecord {
    /// A first attempt with no help used, stamped now.
    pub fn new(
        session_id: impl Into<String>,
        question_id: impl Into<String>,
        entered_answer: impl Into<String>,
        is_correct: bool,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            paper_id: None,
            question_id: question_id.into(),
            skill_id: None,
            entered_answer: entered_answer.into(),
            is_correct,
            attempt_count: default_attempt(),
            hint_level_used: 0,
            used_example: false,
            used_tutor: false,
            used_show_step: false,
            used_reveal_solution: false,
            time_spent_sec: 0,
            recorded_at: Utc::now(),
        }
    }

    /// Whether any kind of help was opened before answering.
    pub fn used_help(&self) -> bool {
        self.hint_level_used > 0
            || self.used_example
            || self.used_tutor
            || self.used_show_step
            || self.used_reveal_solution
    }
}

/// Somewhere attempts are recorded.
pub trait AttemptSink: Send + Sync {
    fn record(&self, attempt: &AttemptRecord) -> Result<()>;
}

/// Append-only JSON-lines file. Writers are serialized by an internal lock.
pub struct JsonlAttemptLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlAttemptLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every well-formed record. A missing file is an empty log.
    pub fn read_all(&self) -> Result<Vec<AttemptRecord>> {
        read_attempts(&self.path)
    }
}

impl AttemptSink for JsonlAttemptLog {
    fn record(&self, attempt: &AttemptRecord) -> Result<()> {
        let line = serde_json::to_string(attempt).context("failed to serialize attempt")?;
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("attempt log lock poisoned"))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create log directory: {}", parent.display())
                })?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open attempt log: {}", self.path.display()))?;
        writeln!(file, "{line}")
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        Ok(())
    }
}

/// Read attempts from a JSON-lines file, skipping malformed lines.
pub fn read_attempts(path: &Path) -> Result<Vec<AttemptRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open attempt log: {}", path.display()))?;

    let mut records = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AttemptRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("skipping malformed line {} in {}: {}", i + 1, path.display(), e);
            }
        }
    }
    Ok(records)
}

/// In-memory sink.
#[derive(Default)]
pub struct MemoryAttemptLog {
    records: Mutex<Vec<AttemptRecord>>,
}

impl MemoryAttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn records(&self) -> Vec<AttemptRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl AttemptSink for MemoryAttemptLog {
    fn record(&self, attempt: &AttemptRecord) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| anyhow::anyhow!("attempt log lock poisoned"))?
            .push(attempt.clone());
        Ok(())
    }
}
