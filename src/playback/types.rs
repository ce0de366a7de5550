// Core types shared by the workflow ticker and the step player

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A single key/value figure shown on a stage card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub key: String,
    pub value: String,
}

impl Metric {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Display label: the camelCase key with its first character upper-cased
    pub fn label(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// One named phase in the workflow ticker display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub metrics: Vec<Metric>,
}

impl Stage {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metrics.push(Metric::new(key, value));
        self
    }
}

/// One unit of scripted output within a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Label of the agent the message is attributed to
    pub source: String,
    pub message: String,
    pub delay_ms: u64,
}

impl Step {
    pub fn new(source: impl Into<String>, message: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            delay_ms,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// An ordered list of steps representing one scripted interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(title: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            title: title.into(),
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of every step delay, i.e. the wall time of one full run
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(Step::delay).sum()
    }
}

/// Status of an item emitted by the step player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Current,
    Completed,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Pending => write!(f, "pending"),
            ItemStatus::Current => write!(f, "current"),
            ItemStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Status of a stage relative to the ticker cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Complete,
    Active,
    Waiting,
}

impl StageStatus {
    /// Card status text
    pub fn label(&self) -> &'static str {
        match self {
            StageStatus::Complete => "Complete",
            StageStatus::Active => "Processing",
            StageStatus::Waiting => "Waiting",
        }
    }
}

/// A step that the player has emitted during the current run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedStep {
    pub id: String,
    pub source: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: ItemStatus,
}

impl EmittedStep {
    pub fn from_step(step: &Step, index: usize) -> Self {
        let timestamp = Utc::now();
        Self {
            id: format!("{}-{}", timestamp.timestamp_millis(), index),
            source: step.source.clone(),
            message: step.message.clone(),
            timestamp,
            status: ItemStatus::Current,
        }
    }
}
