// Browser-console sink - emits records as Wildfire response headers

use super::wildfire::Wildfire;
use super::{Sink, SinkError};
use crate::config::ConfigProvider;
use crate::record::LogRecord;
use std::cell::RefCell;
use std::sync::Arc;

/// Config parameter naming the client IPs allowed to receive console logs.
/// Pipe-separated; each entry is a prefix match, and `ALL` allows everyone.
pub const ALLOWED_IP_PARAMETER: &str = "console.allowed_ip";

/// Setting value that allows every client
const ALL_IPS_ALLOWED: &str = "ALL";

thread_local! {
    static REQUEST: RefCell<Option<RequestScope>> = const { RefCell::new(None) };
}

struct RequestScope {
    client_ip: String,
    wildfire: Wildfire,
}

/// Open a console-logging scope for the request handled on this thread.
///
/// Replaces any scope already open; console writes outside a scope are
/// silently skipped.
pub fn begin_request(client_ip: &str) {
    REQUEST.with(|slot| {
        *slot.borrow_mut() = Some(RequestScope {
            client_ip: client_ip.to_string(),
            wildfire: Wildfire::new(),
        });
    });
}

/// Close the scope and return the headers to attach to the response.
/// Empty when no scope was open or nothing was logged.
pub fn finish_request() -> Vec<(String, String)> {
    REQUEST
        .with(|slot| slot.borrow_mut().take())
        .map(|scope| scope.wildfire.headers())
        .unwrap_or_default()
}

/// Writes log records to the browser console of the current request's
/// client, transported as Wildfire HTTP response headers.
///
/// The client must be allowed by the `console.allowed_ip` setting, which is
/// re-read on every write so changes apply immediately.
pub struct ConsoleHeaderSink {
    config: Arc<dyn ConfigProvider>,
}

impl ConsoleHeaderSink {
    /// Registry identifier for this sink
    pub const IDENTIFIER: &'static str = "console";

    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        Self { config }
    }

    fn ip_allowed(&self, client_ip: &str) -> bool {
        if client_ip.is_empty() {
            return false;
        }
        self.config
            .parameter_list(ALLOWED_IP_PARAMETER)
            .iter()
            .any(|allowed| allowed == ALL_IPS_ALLOWED || client_ip.starts_with(allowed.as_str()))
    }
}

impl Sink for ConsoleHeaderSink {
    fn write_log_entry(&mut self, record: &LogRecord) -> Result<(), SinkError> {
        REQUEST.with(|slot| {
            let mut slot = slot.borrow_mut();
            // Outside a request there is no response to decorate.
            let Some(scope) = slot.as_mut() else {
                return Ok(());
            };
            if !self.ip_allowed(&scope.client_ip) {
                return Ok(());
            }
            scope.wildfire.append(record);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;
    use crate::record::CallerInfo;
    use crate::severity::{Kind, Severity};

    fn sink_with_allowed(allowed: &str) -> ConsoleHeaderSink {
        let config =
            StaticConfig::new(Severity::Debug).with_parameter(ALLOWED_IP_PARAMETER, allowed);
        ConsoleHeaderSink::new(Arc::new(config))
    }

    fn record(message: &str) -> LogRecord {
        LogRecord::new(Kind::Info, message, CallerInfo::unknown(), None)
    }

    #[test]
    fn test_write_without_request_scope_is_skipped() {
        let mut sink = sink_with_allowed("ALL");
        sink.write_log_entry(&record("dropped")).unwrap();
        assert!(finish_request().is_empty());
    }

    #[test]
    fn test_allowed_client_receives_headers() {
        let mut sink = sink_with_allowed("127.0.0.1");
        begin_request("127.0.0.1");
        sink.write_log_entry(&record("hello console")).unwrap();

        let headers = finish_request();
        assert!(!headers.is_empty());
        assert!(headers.iter().any(|(key, _)| key == "X-Wf-1-Index"));
    }

    #[test]
    fn test_disallowed_client_receives_nothing() {
        let mut sink = sink_with_allowed("10.0.");
        begin_request("192.168.1.5");
        sink.write_log_entry(&record("secret")).unwrap();
        assert!(finish_request().is_empty());
    }

    #[test]
    fn test_prefix_match() {
        let mut sink = sink_with_allowed("10.0.");
        begin_request("10.0.3.7");
        sink.write_log_entry(&record("ok")).unwrap();
        assert!(!finish_request().is_empty());
    }

    #[test]
    fn test_all_wildcard() {
        let mut sink = sink_with_allowed("127.0.0.1|ALL");
        begin_request("203.0.113.9");
        sink.write_log_entry(&record("ok")).unwrap();
        assert!(!finish_request().is_empty());
    }

    #[test]
    fn test_unknown_client_is_denied() {
        let mut sink = sink_with_allowed("ALL");
        begin_request("");
        sink.write_log_entry(&record("no ip")).unwrap();
        assert!(finish_request().is_empty());
    }

    #[test]
    fn test_finish_clears_the_scope() {
        let mut sink = sink_with_allowed("ALL");
        begin_request("127.0.0.1");
        sink.write_log_entry(&record("one")).unwrap();
        assert!(!finish_request().is_empty());
        // Scope is gone; the next write has nowhere to go.
        sink.write_log_entry(&record("two")).unwrap();
        assert!(finish_request().is_empty());
    }
}
