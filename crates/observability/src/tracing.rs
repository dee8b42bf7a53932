//! Span macros and span helpers

/// Create a span for one conversation session operation
///
/// ```
/// use webpilot_observability::session_span;
///
/// let span = session_span!("0b6c1f1e", "run_session");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! session_span {
    ($session_id:expr, $operation:expr) => {
        tracing::info_span!(
            "session.operation",
            session.id = $session_id,
            operation = $operation,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Create a span for a single effector invocation
///
/// ```
/// use webpilot_observability::tool_span;
///
/// let span = tool_span!("navigate", "toolu_01");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! tool_span {
    ($tool_name:expr, $tool_use_id:expr) => {
        tracing::info_span!(
            "tool.invoke",
            tool.name = $tool_name,
            tool.use_id = $tool_use_id,
            tool.duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and log it.
///
/// Fields are only recorded when the span declares them, as the macros above do.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record a duration in milliseconds on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
