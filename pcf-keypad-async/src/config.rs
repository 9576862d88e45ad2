//! Construction-time settings for [`PcfKeypad`](crate::keypad::PcfKeypad).

use core::fmt;

use embassy_time::Duration;
use embedded_hal_async::i2c::SevenBitAddress;

/// PCF8574 base address with A0..A2 tied low.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x20;

/// Wait before the first port read of a scan.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(50);

/// Settings for one keypad on one expander.
///
/// ```
/// use embassy_time::Duration;
/// use pcf_keypad_async::config::KeypadConfig;
///
/// let config = KeypadConfig::default()
///     .with_address(0x27)
///     .with_settle(Duration::from_millis(20))
///     .with_debug(true);
/// assert_eq!(config.address, 0x27);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadConfig {
    /// 7-bit bus address of the expander.
    pub address: SevenBitAddress,
    /// Time allowed for switch contacts and port lines to settle before the
    /// first read. Slow pull-ups or bouncy switches need more.
    pub settle: Duration,
    /// Forward scan diagnostics to the driver's sink.
    pub debug: bool,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            settle: DEFAULT_SETTLE,
            debug: false,
        }
    }
}

impl KeypadConfig {
    /// Sets the expander's bus address.
    pub fn with_address(mut self, address: SevenBitAddress) -> Self {
        self.address = address;
        self
    }

    /// Sets the settle delay.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Enables or disables scan diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Checks the settings before a driver is built from them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::InvalidAddress(self.address));
        }
        Ok(())
    }
}

/// A rejected [`KeypadConfig`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The address does not fit in 7 bits.
    InvalidAddress(u8),
}

impl fmt::Debug for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(address) => write!(f, "InvalidAddress({address:#04x})"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(address) => {
                write!(f, "I2C address {address:#04x} is not a 7-bit address")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
