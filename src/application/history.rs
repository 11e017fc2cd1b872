// History log - Append-only record log backing CSV export
use crate::domain::telemetry::TelemetryRecord;
use std::collections::VecDeque;

/// Every committed record, oldest first.
///
/// With a capacity the oldest entries are dropped once full and counted in
/// `dropped()`; without one the log grows for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: VecDeque<TelemetryRecord>,
    capacity: Option<usize>,
    dropped: u64,
}

impl HistoryLog {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            dropped: 0,
        }
    }

    pub fn append(&mut self, record: TelemetryRecord) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                self.dropped += 1;
                return;
            }
            while self.entries.len() >= capacity {
                self.entries.pop_front();
                self.dropped += 1;
            }
        }
        self.entries.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelemetryRecord> {
        self.entries.iter()
    }
}
