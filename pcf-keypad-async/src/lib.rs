//! An asynchronous, `no_std` driver for matrix keypads behind an I2C port expander.
//!
//! The keypad's row and column lines are wired to the two nibbles of a
//! PCF8574-style 8-bit expander. `PcfKeypad` finds the pressed key by reading
//! the port under two complementary drive patterns and XOR-ing the samples;
//! the resulting scan code is looked up in a [`Keymap`].
//!
//! Scan codes depend on the wiring. To calibrate a new keypad, enable `debug`
//! in the [`KeypadConfig`], initialise a logger and press every key once: each
//! press logs the code in binary and decimal.
//!
//! # Usage
//!
//! You need an I2C peripheral implementing `embedded-hal-async::i2c::I2c` and a
//! delay implementing `embedded-hal-async::delay::DelayNs`.
//!
//! ```ignore
//! use embassy_time::{Delay, Duration, Timer};
//! use esp_hal::i2c::master::I2c;
//! use pcf_keypad_async::{Keymap, KeypadConfig, PcfKeypad};
//!
//! #[esp_hal_embassy::main]
//! async fn main(_spawner: Spawner) {
//!     let peripherals = esp_hal::init(Config::default().with_cpu_clock(CpuClock::max()));
//!     let config = esp_hal::i2c::master::Config::default().with_frequency(Rate::from_khz(100));
//!     let i2c = I2c::new(peripherals.I2C0, config)
//!         .unwrap()
//!         .with_sda(peripherals.GPIO13)
//!         .with_scl(peripherals.GPIO14)
//!         .into_async();
//!
//!     let keymap: Keymap<12> = Keymap::from_parallel(
//!         &['1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '0', '#'],
//!         &[119, 123, 125, 183, 187, 189, 215, 219, 221, 231, 235, 237],
//!     )
//!     .unwrap();
//!     let mut keypad = PcfKeypad::new(i2c, Delay, keymap, KeypadConfig::default()).unwrap();
//!     keypad.init().await.unwrap();
//!
//!     loop {
//!         if let Some(key) = keypad.poll().await {
//!             log::info!("Key pressed: {key}");
//!         }
//!         Timer::after(Duration::from_millis(10)).await;
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod config;
pub mod diagnostics;
pub mod keymap;
pub mod keypad;

pub use bus::ExpanderBus;
pub use config::{ConfigError, KeypadConfig};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, NoopSink};
pub use keymap::{Keymap, KeymapError, NO_KEY, UNKNOWN_KEY};
pub use keypad::{PcfKeypad, IDLE_PATTERN, SCAN_PATTERN};
