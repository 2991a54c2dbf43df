// SPDX-License-Identifier: Apache-2.0 OR MIT
// In-memory capture sink with a hard capacity cap

use super::{Sink, SinkError};
use crate::record::LogRecord;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The max number of records kept in memory.
pub const MEMORY_SINK_CAPACITY: usize = 1000;

// One buffer for the whole process; every MemorySink instance writes here.
static RECORDS: Mutex<Vec<LogRecord>> = Mutex::new(Vec::new());

fn records() -> MutexGuard<'static, Vec<LogRecord>> {
    // A panicking writer must not take the facade down with it.
    RECORDS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps log records in memory for inspection, typically from tests or a
/// diagnostics page.
///
/// The buffer is shared process-wide and lives until explicitly emptied:
/// records from all threads land here, and nothing is trimmed automatically
/// except by the capacity cap. Call [`MemorySink::flush_and_clear`] or
/// [`MemorySink::clear`] to empty it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemorySink;

impl MemorySink {
    /// Registry identifier for this sink
    pub const IDENTIFIER: &'static str = "memory";

    pub fn new() -> Self {
        Self
    }

    /// Return all captured records in write order and empty the buffer.
    ///
    /// Copy and reset happen under one lock, so no record written
    /// concurrently is lost or duplicated.
    pub fn flush_and_clear() -> Vec<LogRecord> {
        std::mem::take(&mut *records())
    }

    /// Empty the buffer without returning anything
    pub fn clear() {
        records().clear();
    }

    /// Number of records currently buffered
    pub fn len() -> usize {
        records().len()
    }

    /// Check if the buffer is empty
    pub fn is_empty() -> bool {
        Self::len() == 0
    }
}

impl Sink for MemorySink {
    fn write_log_entry(&mut self, record: &LogRecord) -> Result<(), SinkError> {
        let mut buffer = records();
        // At capacity the new record is dropped, not the oldest.
        if buffer.len() < MEMORY_SINK_CAPACITY {
            buffer.push(record.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CallerInfo;
    use crate::severity::Kind;
    use std::sync::Arc;

    // The buffer is process-global, so tests touching it must not overlap.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(message: &str) -> LogRecord {
        LogRecord::new(Kind::Info, message, CallerInfo::unknown(), None)
    }

    #[test]
    fn test_capacity_drops_new_records() {
        let _guard = serial();
        MemorySink::clear();

        let mut sink = MemorySink::new();
        for i in 0..(MEMORY_SINK_CAPACITY + 1) {
            sink.write_log_entry(&record(&format!("entry {}", i))).unwrap();
        }

        assert_eq!(MemorySink::len(), MEMORY_SINK_CAPACITY);
        let captured = MemorySink::flush_and_clear();
        // The overflowing write was a no-op, so the last stored record is
        // the one written at the capacity boundary.
        assert_eq!(
            captured.last().map(|r| r.message.as_str()),
            Some(format!("entry {}", MEMORY_SINK_CAPACITY - 1).as_str())
        );
    }

    #[test]
    fn test_flush_returns_in_write_order_and_empties() {
        let _guard = serial();
        MemorySink::clear();

        let mut sink = MemorySink::new();
        sink.write_log_entry(&record("first")).unwrap();
        sink.write_log_entry(&record("second")).unwrap();
        sink.write_log_entry(&record("third")).unwrap();

        let captured = MemorySink::flush_and_clear();
        let messages: Vec<&str> = captured.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert!(MemorySink::is_empty());

        // Writes after a flush start from an empty buffer.
        sink.write_log_entry(&record("fourth")).unwrap();
        assert_eq!(MemorySink::len(), 1);
        MemorySink::clear();
    }

    #[test]
    fn test_clear_discards_without_returning() {
        let _guard = serial();
        MemorySink::clear();

        let mut sink = MemorySink::new();
        sink.write_log_entry(&record("gone")).unwrap();
        MemorySink::clear();
        assert!(MemorySink::is_empty());
    }

    #[test]
    fn test_concurrent_writes_are_all_kept() {
        let _guard = serial();
        MemorySink::clear();

        let threads = 8;
        let per_thread = 50;
        let mut handles = Vec::new();
        let barrier = Arc::new(std::sync::Barrier::new(threads));

        for t in 0..threads {
            let barrier = Arc::clone(&barrier);
            handles.push(std::thread::spawn(move || {
                let mut sink = MemorySink::new();
                barrier.wait();
                for i in 0..per_thread {
                    sink.write_log_entry(&record(&format!("t{} m{}", t, i)))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(MemorySink::len(), threads * per_thread);
        MemorySink::clear();
    }
}
