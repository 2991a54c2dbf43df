// SPDX-License-Identifier: Apache-2.0 OR MIT
// Logging macros that capture the call site

/// Log an audit message, recording the calling module and line
///
/// # Examples
/// ```ignore
/// log_audit!(dispatcher, "user signed in");
/// ```
#[macro_export]
macro_rules! log_audit {
    ($dispatcher:expr, $msg:expr) => {
        $dispatcher.emit(
            $crate::Kind::Audit,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            None,
        )
    };
}

/// Log a debug message, recording the calling module and line
///
/// # Examples
/// ```ignore
/// log_debug!(dispatcher, "parsing request body");
/// ```
#[macro_export]
macro_rules! log_debug {
    ($dispatcher:expr, $msg:expr) => {
        $dispatcher.emit(
            $crate::Kind::Debug,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            None,
        )
    };
}

/// Log an info message, recording the calling module and line
///
/// # Examples
/// ```ignore
/// log_info!(dispatcher, "cache warmed");
/// ```
#[macro_export]
macro_rules! log_info {
    ($dispatcher:expr, $msg:expr) => {
        $dispatcher.emit(
            $crate::Kind::Info,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            None,
        )
    };
}

/// Log a warning, recording the calling module and line.
/// An optional error value is carried on the record.
///
/// # Examples
/// ```ignore
/// log_warn!(dispatcher, "buffer near capacity");
/// log_warn!(dispatcher, "retrying", err);
/// ```
#[macro_export]
macro_rules! log_warn {
    ($dispatcher:expr, $msg:expr) => {
        $dispatcher.emit(
            $crate::Kind::Warn,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            None,
        )
    };
    ($dispatcher:expr, $msg:expr, $err:expr) => {
        $dispatcher.emit(
            $crate::Kind::Warn,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            Some($err.into()),
        )
    };
}

/// Log an error, recording the calling module and line.
/// An optional error value is carried on the record.
///
/// # Examples
/// ```ignore
/// log_error!(dispatcher, "failed to bind socket");
/// log_error!(dispatcher, "failed to bind socket", err);
/// ```
#[macro_export]
macro_rules! log_error {
    ($dispatcher:expr, $msg:expr) => {
        $dispatcher.emit(
            $crate::Kind::Error,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            None,
        )
    };
    ($dispatcher:expr, $msg:expr, $err:expr) => {
        $dispatcher.emit(
            $crate::Kind::Error,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            Some($err.into()),
        )
    };
}

/// Log a fatal message, recording the calling module and line.
/// An optional error value is carried on the record.
///
/// # Examples
/// ```ignore
/// log_fatal!(dispatcher, "worker crashed", err);
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($dispatcher:expr, $msg:expr) => {
        $dispatcher.emit(
            $crate::Kind::Fatal,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            None,
        )
    };
    ($dispatcher:expr, $msg:expr, $err:expr) => {
        $dispatcher.emit(
            $crate::Kind::Fatal,
            $crate::CallerInfo::new(module_path!(), line!()),
            $msg,
            Some($err.into()),
        )
    };
}
