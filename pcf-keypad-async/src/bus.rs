//! Register-level access to the expander's single 8-bit port.

use embedded_hal_async::i2c::{I2c, SevenBitAddress};

/// The two bus operations the keypad driver needs from its transport.
///
/// A PCF8574-style expander has no register file: writing a byte drives the
/// port, reading a byte samples it. Every [`I2c`] implementation gets this
/// trait for free, so the driver takes the bus handle directly. A simulated
/// transport can implement it by hand.
#[allow(async_fn_in_trait)]
pub trait ExpanderBus {
    /// Error reported by the underlying transport.
    type Error: core::fmt::Debug;

    /// Drives the port of the device at `address` with `value`.
    async fn write_port(&mut self, address: SevenBitAddress, value: u8) -> Result<(), Self::Error>;

    /// Samples the port of the device at `address`.
    ///
    /// An error means the device did not hand over a byte.
    async fn read_port(&mut self, address: SevenBitAddress) -> Result<u8, Self::Error>;
}

impl<T: I2c<SevenBitAddress>> ExpanderBus for T {
    type Error = T::Error;

    async fn write_port(&mut self, address: SevenBitAddress, value: u8) -> Result<(), Self::Error> {
        self.write(address, &[value]).await
    }

    async fn read_port(&mut self, address: SevenBitAddress) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read(address, &mut buf).await?;
        Ok(buf[0])
    }
}
