// SPDX-License-Identifier: Apache-2.0 OR MIT
// Wildfire (FirePHP) header encoding for the browser-console sink

use crate::record::LogRecord;
use crate::severity::Kind;
use serde_json::json;

// Protocol headers identifying the stream to FirePHP-aware consoles.
const BASE_HEADERS: [(&str, &str); 3] = [
    (
        "X-Wf-Protocol-1",
        "http://meta.wildfirehq.org/Protocol/JsonStream/0.2",
    ),
    (
        "X-Wf-1-Plugin-1",
        "http://meta.firephp.org/Wildfire/Plugin/FirePHP/Library-FirePHPCore/0.3",
    ),
    (
        "X-Wf-1-Structure-1",
        "http://meta.firephp.org/Wildfire/Structure/FirePHP/FirebugConsole/0.1",
    ),
];

struct WildfireEntry {
    log_type: &'static str,
    message: String,
    file: String,
    line: u32,
}

/// Accumulates console log entries and renders them as Wildfire response
/// headers understood by browser developer consoles.
#[derive(Default)]
pub struct Wildfire {
    entries: Vec<WildfireEntry>,
}

impl Wildfire {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map a record onto the Wildfire vocabulary and queue it.
    ///
    /// The console has no FATAL or AUDIT notion, so those kinds travel as
    /// ERROR and INFO with a message prefix.
    pub fn append(&mut self, record: &LogRecord) {
        let (log_type, message) = match record.kind {
            Kind::Debug => ("LOG", record.message.clone()),
            Kind::Info => ("INFO", record.message.clone()),
            Kind::Warn => ("WARN", record.message.clone()),
            Kind::Error => ("ERROR", record.message.clone()),
            Kind::Fatal => ("ERROR", format!("FATAL:{}", record.message)),
            Kind::Audit => ("INFO", format!("AUDIT:{}", record.message)),
        };
        self.entries.push(WildfireEntry {
            log_type,
            message,
            file: record.caller.clone(),
            line: record.line,
        });
    }

    /// Render all headers: the base protocol headers, one numbered header
    /// per entry framed as `{length}|{json}|`, and the index header.
    /// Empty when nothing was appended.
    pub fn headers(&self) -> Vec<(String, String)> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let mut headers: Vec<(String, String)> = BASE_HEADERS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        for (i, entry) in self.entries.iter().enumerate() {
            let header = json!({
                "Type": entry.log_type,
                "File": entry.file,
                "Line": entry.line,
            });
            let payload = format!("[{}, {}]", header, json!(entry.message));
            headers.push((
                format!("X-Wf-1-1-1-{}", i + 1),
                format!("{}|{}|", payload.len(), payload),
            ));
        }

        headers.push(("X-Wf-1-Index".to_string(), self.entries.len().to_string()));
        headers
    }
}
