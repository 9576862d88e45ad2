//! Scan diagnostics, used mainly to calibrate a keymap for a new keypad.

/// Something worth reporting about a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A switch was seen closed; `raw` is the scan code to put in the keymap.
    Activity { raw: u8 },
    /// The expander did not hand over a byte during a scan.
    ReadUnavailable,
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink {
    /// Handles one event.
    fn emit(&mut self, event: Diagnostic);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&mut self, _event: Diagnostic) {}
}

/// Writes events through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, event: Diagnostic) {
        match event {
            Diagnostic::Activity { raw } => {
                log::info!("RAW BYTE: {raw:08b}");
                log::info!("DECIMAL : {raw} (use this value as the key's scan code)");
            }
            Diagnostic::ReadUnavailable => log::warn!("expander returned no data"),
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, event: Diagnostic) {
        (**self).emit(event)
    }
}
