//! Core implementation of the expander keypad driver.

use embedded_hal_async::delay::DelayNs;
use log::{debug, trace, warn};

use crate::bus::ExpanderBus;
use crate::config::{ConfigError, KeypadConfig};
use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::keymap::{Keymap, NO_KEY};

/// Port pattern between scans: lower nibble released high, upper nibble low.
pub const IDLE_PATTERN: u8 = 0b0000_1111;

/// Complementary pattern applied for the second read of a scan.
pub const SCAN_PATTERN: u8 = 0b1111_0000;

/// A matrix keypad read through an 8-bit I2C port expander.
///
/// Rows sit on P0..P3 and columns on P4..P7 (or the other way round), with
/// pull-ups on one side. A scan samples the port under [`IDLE_PATTERN`], flips
/// to [`SCAN_PATTERN`], samples again and XORs the two samples. With nothing
/// pressed the two samples are the two patterns themselves and the result is
/// [`NO_KEY`]; a closed switch drags one line per nibble and yields a code
/// unique to that key.
pub struct PcfKeypad<B, D, const N: usize, S = LogSink> {
    bus: B,
    delay: D,
    keymap: Keymap<N>,
    config: KeypadConfig,
    sink: S,
}

impl<B: ExpanderBus, D: DelayNs, const N: usize> PcfKeypad<B, D, N, LogSink> {
    /// Creates a new `PcfKeypad`.
    ///
    /// # Arguments
    ///
    /// * `bus` - The expander's bus, usually an `embedded-hal-async` I2C handle.
    /// * `delay` - Delay provider used for the settle time, e.g. `embassy_time::Delay`.
    /// * `keymap` - Scan-code to key mapping for this keypad.
    /// * `config` - Address, settle time and debug switch.
    ///
    /// The driver starts with [`LogSink`], but nothing reaches it unless
    /// `config.debug` is set, so with the default config it behaves like a
    /// no-op sink. Use [`with_sink`](PcfKeypad::with_sink) to pick another
    /// sink, e.g. [`NoopSink`](crate::diagnostics::NoopSink).
    pub fn new(
        bus: B,
        delay: D,
        keymap: Keymap<N>,
        config: KeypadConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bus,
            delay,
            keymap,
            config,
            sink: LogSink,
        })
    }
}

impl<B: ExpanderBus, D: DelayNs, const N: usize, S: DiagnosticSink> PcfKeypad<B, D, N, S> {
    /// Replaces the diagnostic sink.
    pub fn with_sink<T: DiagnosticSink>(self, sink: T) -> PcfKeypad<B, D, N, T> {
        PcfKeypad {
            bus: self.bus,
            delay: self.delay,
            keymap: self.keymap,
            config: self.config,
            sink,
        }
    }

    /// Destroys the driver and hands back the bus and delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Settings the driver was built with.
    pub fn config(&self) -> &KeypadConfig {
        &self.config
    }

    /// The keymap used to resolve scan codes.
    pub fn keymap(&self) -> &Keymap<N> {
        &self.keymap
    }

    /// Puts the port into the idle pattern. Call once before the first poll.
    pub async fn init(&mut self) -> Result<(), B::Error> {
        trace!("initializing keypad at {:#04x}", self.config.address);
        self.bus
            .write_port(self.config.address, IDLE_PATTERN)
            .await
            .map_err(|err| {
                warn!("Error writing idle pattern: {err:?}");
                err
            })
    }

    /// Reads the key that is currently held.
    ///
    /// Returns `None` when nothing is pressed or the expander could not be
    /// read, `Some(UNKNOWN_KEY)` for a press whose scan code is not mapped.
    pub async fn poll(&mut self) -> Option<char> {
        let raw = self.scan().await?;
        self.keymap.resolve(raw)
    }

    /// Runs one two-phase scan and returns the raw scan byte.
    ///
    /// `Some(NO_KEY)` means no switch is closed. `None` means the bus failed
    /// during the scan and the byte is meaningless. Either way the idle
    /// pattern is written again before returning.
    pub async fn scan(&mut self) -> Option<u8> {
        let settle_us = u32::try_from(self.config.settle.as_micros()).unwrap_or(u32::MAX);
        self.delay.delay_us(settle_us).await;

        let first = self.read_port().await;
        let second = match self.bus.write_port(self.config.address, SCAN_PATTERN).await {
            Ok(()) => self.read_port().await,
            Err(err) => {
                debug!("Error writing scan pattern: {err:?}");
                None
            }
        };

        if let Err(err) = self.bus.write_port(self.config.address, IDLE_PATTERN).await {
            warn!("Error restoring idle pattern: {err:?}");
        }

        let (Some(first), Some(second)) = (first, second) else {
            return None;
        };
        let raw = first ^ second;
        trace!("scan {first:#010b} ^ {second:#010b} = {raw:#010b}");
        if raw != NO_KEY {
            self.diagnose(Diagnostic::Activity { raw });
        }
        Some(raw)
    }

    async fn read_port(&mut self) -> Option<u8> {
        match self.bus.read_port(self.config.address).await {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("Error reading port: {err:?}");
                self.diagnose(Diagnostic::ReadUnavailable);
                None
            }
        }
    }

    fn diagnose(&mut self, event: Diagnostic) {
        if self.config.debug {
            self.sink.emit(event);
        }
    }
}
