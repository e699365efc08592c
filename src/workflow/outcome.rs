//! Outcome events delivered to the metrics sink.

use std::time::Duration;

/// Immutable record of one completed logical operation.
///
/// Exactly one event is produced per Work Item; fire-and-forget
/// submissions report the submit round-trip, tracked submissions report
/// the full submit-to-terminal span.
#[derive(Debug, Clone)]
pub struct OutcomeEvent {
    /// Logical operation name (e.g., "submit_block").
    pub operation: &'static str,

    /// Elapsed time from operation start to its terminal state.
    pub duration: Duration,

    /// Whether the operation reached its success state.
    pub success: bool,

    /// Error description when `success` is false.
    pub error: Option<String>,

    /// Payload size in bytes (zero for read-only operations).
    pub bytes: usize,
}

impl OutcomeEvent {
    pub fn success(operation: &'static str, duration: Duration, bytes: usize) -> Self {
        Self {
            operation,
            duration,
            success: true,
            error: None,
            bytes,
        }
    }

    pub fn failure(
        operation: &'static str,
        duration: Duration,
        error: impl Into<String>,
        bytes: usize,
    ) -> Self {
        Self {
            operation,
            duration,
            success: false,
            error: Some(error.into()),
            bytes,
        }
    }

    /// Build an event from a fallible operation's result.
    pub fn from_result<T, E: std::fmt::Display>(
        operation: &'static str,
        duration: Duration,
        result: &Result<T, E>,
        bytes: usize,
    ) -> Self {
        match result {
            Ok(_) => Self::success(operation, duration, bytes),
            Err(e) => Self::failure(operation, duration, e.to_string(), bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_event_has_no_error() {
        let event = OutcomeEvent::success("submit_block", Duration::from_millis(12), 64);
        assert!(event.success);
        assert!(event.error.is_none());
        assert_eq!(event.bytes, 64);
    }

    #[test]
    fn test_from_result_maps_error_text() {
        let result: Result<(), String> = Err("node unreachable".to_string());
        let event = OutcomeEvent::from_result("node_info", Duration::from_millis(3), &result, 0);
        assert!(!event.success);
        assert_eq!(event.error.as_deref(), Some("node unreachable"));
    }
}
