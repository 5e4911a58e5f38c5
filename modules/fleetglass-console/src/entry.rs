//! The rendered log entry model.

use std::fmt;

/// Category of a rendered entry. Decides the icon and whatever callout
/// styling the hosting surface applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryCategory {
    Heartbeat,
    Registration,
    Deregistration,
    Observation,
    Summary,
    Info,
}

impl EntryCategory {
    pub fn icon(self) -> &'static str {
        match self {
            EntryCategory::Heartbeat => "♥",
            EntryCategory::Registration => "⊕",
            EntryCategory::Deregistration => "⊖",
            EntryCategory::Observation => "◉",
            EntryCategory::Summary => "∑",
            EntryCategory::Info => "ℹ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntryCategory::Heartbeat => "heartbeat",
            EntryCategory::Registration => "registration",
            EntryCategory::Deregistration => "deregistration",
            EntryCategory::Observation => "observe",
            EntryCategory::Summary => "summary",
            EntryCategory::Info => "info",
        }
    }
}

/// One rendered feed entry: a category tag plus display text. Immutable
/// once rendered; the sink only ever prepends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub category: EntryCategory,
    pub title: String,
    pub body: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.category.icon(), self.title)?;
        for line in self.body.lines() {
            writeln!(f, "    {line}")?;
        }
        Ok(())
    }
}
