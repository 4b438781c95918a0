//! Structured event macros.
//!
//! Every event carries a `subsystem` field (`validator`, `reconciler`,
//! `store`, `presenter`, `decoder`, `console`) so log queries can filter by
//! component without relying on module paths.

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a scan outcome with standard fields.
#[macro_export]
macro_rules! log_scan_event {
    ($level:ident, $msg:expr, $outcome:expr, $ticket_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = "validator",
            outcome = %$outcome,
            ticket_id = %$ticket_id,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a stats snapshot with the five tile values.
#[macro_export]
macro_rules! log_stats_event {
    ($level:ident, $msg:expr, $today:expr, $session:expr, $total:expr, $valid:expr, $failed:expr) => {
        tracing::$level!(
            subsystem = "reconciler",
            today = $today,
            session = $session,
            total = $total,
            valid = $valid,
            failed = $failed,
            $msg
        )
    };
}
