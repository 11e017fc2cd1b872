// Command console - Display-only passthrough for operator commands
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

pub const RESET_COMMAND: &str = "N";
/// Most recent submissions kept for display.
pub const COMMAND_LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandEntry {
    pub command: String,
    pub entered_at: DateTime<Utc>,
}

/// Holds whatever the operator typed. Commands are neither validated nor
/// executed; they are kept for display only.
#[derive(Debug, Clone, Serialize)]
pub struct CommandConsole {
    current: String,
    submitted: VecDeque<CommandEntry>,
}

impl CommandConsole {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
            submitted: VecDeque::with_capacity(COMMAND_LOG_CAPACITY),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Oldest first.
    pub fn submitted(&self) -> impl Iterator<Item = &CommandEntry> {
        self.submitted.iter()
    }

    pub fn submit(&mut self, command: &str) -> &CommandEntry {
        let command = command.trim().to_string();
        tracing::info!(command = %command, "operator command entered");
        self.current = command.clone();
        if self.submitted.len() == COMMAND_LOG_CAPACITY {
            self.submitted.pop_front();
        }
        self.submitted.push_back(CommandEntry {
            command,
            entered_at: Utc::now(),
        });
        &self.submitted[self.submitted.len() - 1]
    }

    pub fn reset(&mut self) {
        self.current = RESET_COMMAND.to_string();
    }
}
