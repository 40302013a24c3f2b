//! Rolling transcript of committed messages and failures, persisted as JSON
//! lines for offline inspection.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use super::types::ChatRole;

const DEFAULT_TRANSCRIPT_LOG_PATH: &str = "logs/chat_transcript.jsonl";

const DEFAULT_TRANSCRIPT_CAPACITY: usize = 64;

/// Keeps a bounded in-memory tail of the conversation and appends every
/// record to a JSONL file on flush.
#[derive(Resource, Debug)]
pub struct ChatTranscript {
    output_path: PathBuf,
    pending: Vec<TranscriptRecord>,
    recent: VecDeque<TranscriptRecord>,
    capacity: usize,
}

impl ChatTranscript {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
            recent: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn record_message(
        &mut self,
        occurred_at_seconds: f64,
        role: ChatRole,
        content: impl Into<String>,
    ) {
        self.push(TranscriptRecord {
            occurred_at_seconds,
            event: TranscriptEvent::Message {
                role,
                content: content.into(),
            },
        });
    }

    pub fn record_failure(&mut self, occurred_at_seconds: f64, error: impl Into<String>) {
        self.push(TranscriptRecord {
            occurred_at_seconds,
            event: TranscriptEvent::Failure {
                error: error.into(),
            },
        });
    }

    fn push(&mut self, record: TranscriptRecord) {
        while self.recent.len() >= self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(record.clone());
        self.pending.push(record);
    }

    #[allow(dead_code)]
    pub fn records(&self) -> impl Iterator<Item = &TranscriptRecord> {
        self.recent.iter()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    fn drain_pending(&mut self) -> Vec<TranscriptRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        for record in self.drain_pending() {
            let serialisable: SerializableTranscriptRecord = record.into();
            serde_json::to_writer(&mut file, &serialisable)?;
            file.write_all(b"\n")?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_LOG_PATH, DEFAULT_TRANSCRIPT_CAPACITY)
    }
}

/// Single transcript entry.
#[derive(Debug, Clone)]
pub struct TranscriptRecord {
    pub occurred_at_seconds: f64,
    pub event: TranscriptEvent,
}

/// Either a committed message or a backend failure.
#[derive(Debug, Clone)]
pub enum TranscriptEvent {
    Message { role: ChatRole, content: String },
    Failure { error: String },
}

/// Flushes pending transcript entries to disk, logging a warning if
/// persistence fails.
pub fn flush_chat_transcript(mut transcript: ResMut<ChatTranscript>) {
    if let Err(err) = transcript.flush() {
        warn!(
            "Failed to persist chat transcript to {:?}: {}",
            transcript.path(),
            err
        );
    }
}

#[derive(Serialize)]
struct SerializableTranscriptRecord {
    occurred_at_seconds: f64,
    event: SerializableTranscriptEvent,
}

impl From<TranscriptRecord> for SerializableTranscriptRecord {
    fn from(value: TranscriptRecord) -> Self {
        Self {
            occurred_at_seconds: value.occurred_at_seconds,
            event: value.event.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum SerializableTranscriptEvent {
    Message { role: String, content: String },
    Failure { error: String },
}

impl From<TranscriptEvent> for SerializableTranscriptEvent {
    fn from(value: TranscriptEvent) -> Self {
        match value {
            TranscriptEvent::Message { role, content } => Self::Message {
                role: role.label().to_string(),
                content,
            },
            TranscriptEvent::Failure { error } => Self::Failure { error },
        }
    }
}
