#![cfg_attr(not(test), no_std)]
//! Asynchronous shared I2C bus for embedded-hal drivers.
//!
//! Several port expanders can sit on one I2C bus. Put the bus in an
//! `embassy_sync` mutex and give each driver its own
//! [`MutexI2cDevice`](i2c::MutexI2cDevice) that borrows it. The devices need no
//! allocator, and each call holds the lock for one whole I2C operation.
//!
//! Embassy ships a similar device in `embassy-embedded-hal`'s `shared_bus` module.

pub mod i2c;
