use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Agent => write!(f, "agent"),
            Role::System => write!(f, "system"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub source: Option<String>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only message log for one chat session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, role: Role, source: Option<String>, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            role,
            source,
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Role::User, None, text);
    }

    pub fn push_agent(&mut self, source: impl Into<String>, text: impl Into<String>) {
        self.push(Role::Agent, Some(source.into()), text);
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        self.push(Role::System, None, text);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_insertion_order_and_roles() {
        let mut transcript = Transcript::new();
        transcript.push_system("welcome");
        transcript.push_user("hi");
        transcript.push_agent("Intent Agent", "classified");

        let roles: Vec<Role> = transcript.entries().iter().map(|e| e.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Agent]);
        assert_eq!(transcript.last().and_then(|e| e.source.as_deref()), Some("Intent Agent"));
    }

    #[test]
    fn clear_empties_the_log() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
