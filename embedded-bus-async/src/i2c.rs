use embassy_sync::{blocking_mutex::raw::RawMutex, mutex::Mutex};
use embedded_hal::i2c::{Operation, SevenBitAddress};
use embedded_hal_async::i2c::{self, I2c};

/// `Mutex`-based shared bus [`I2c`] device.
///
/// Several expanders usually hang off one I2C bus. Each driver gets its own
/// [`MutexI2cDevice`] and talks to its own address; the mutex is held for a
/// whole transaction so a write and its follow-up read are never interleaved
/// with another device's traffic.
pub struct MutexI2cDevice<'a, M: RawMutex, BUS> {
    bus: &'a Mutex<M, BUS>,
}

impl<'a, M: RawMutex, BUS> MutexI2cDevice<'a, M, BUS> {
    /// Create a new [`MutexI2cDevice`] borrowing the shared bus.
    pub fn new(bus: &'a Mutex<M, BUS>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, BUS> Clone for MutexI2cDevice<'_, M, BUS> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<M: RawMutex, BUS: i2c::ErrorType> i2c::ErrorType for MutexI2cDevice<'_, M, BUS> {
    type Error = BUS::Error;
}

impl<M: RawMutex, BUS: I2c<SevenBitAddress>> I2c<SevenBitAddress> for MutexI2cDevice<'_, M, BUS> {
    async fn read(&mut self, address: SevenBitAddress, read: &mut [u8]) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        log::trace!("i2c read of {} bytes from {address:#04x}", read.len());
        bus.read(address, read).await
    }

    async fn write(&mut self, address: SevenBitAddress, write: &[u8]) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        log::trace!("i2c write of {} bytes to {address:#04x}", write.len());
        bus.write(address, write).await
    }

    async fn write_read(
        &mut self,
        address: SevenBitAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.write_read(address, write, read).await
    }

    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.transaction(address, operations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn devices_share_one_bus_in_call_order() {
        let expectations = [
            I2cTransaction::write(0x20, vec![0x0F]),
            I2cTransaction::write(0x21, vec![0x0F]),
            I2cTransaction::read(0x20, vec![0x0E]),
        ];
        let mut mock = I2cMock::new(&expectations);
        let bus: Mutex<NoopRawMutex, _> = Mutex::new(mock.clone());

        let mut first = MutexI2cDevice::new(&bus);
        let mut second = first.clone();

        block_on(async {
            first.write(0x20, &[0x0F]).await.unwrap();
            second.write(0x21, &[0x0F]).await.unwrap();
            let mut buf = [0u8; 1];
            first.read(0x20, &mut buf).await.unwrap();
            assert_eq!(buf, [0x0E]);
        });

        mock.done();
    }

    #[test]
    fn bus_errors_pass_through_and_release_the_lock() {
        let expectations = [
            I2cTransaction::read(0x20, vec![0x00]).with_error(ErrorKind::Other),
            I2cTransaction::write_read(0x20, vec![0x00], vec![0xF0]),
        ];
        let mut mock = I2cMock::new(&expectations);
        let bus: Mutex<NoopRawMutex, _> = Mutex::new(mock.clone());
        let mut device = MutexI2cDevice::new(&bus);

        block_on(async {
            let mut buf = [0u8; 1];
            assert_eq!(device.read(0x20, &mut buf).await, Err(ErrorKind::Other));
            assert!(bus.try_lock().is_ok());

            device.write_read(0x20, &[0x00], &mut buf).await.unwrap();
            assert_eq!(buf, [0xF0]);
        });

        mock.done();
    }
}
