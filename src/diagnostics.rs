/// Destination for a session's non-fatal notices.
///
/// Injected at session construction; the crate owns no process-wide logging
/// state. The default sink forwards to the `log` facade.
pub trait DiagnosticsSink {
    fn debug(&self, message: &str);
    fn notice(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn debug(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn notice(&self, message: &str) {
        log::warn!("{}", message);
    }
}
