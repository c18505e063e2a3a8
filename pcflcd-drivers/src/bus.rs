//! `embedded-hal` bus adapter
//!
//! Lets any `embedded_hal::i2c::I2c` implementation (embassy, rp-hal,
//! linux-embedded-hal, ...) serve as the controller's transport.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use pcflcd_hal::{I2cBus, I2cBusError};

/// Wraps an `embedded-hal` 1.0 blocking I2C bus
pub struct HalI2c<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> HalI2c<I2C> {
    /// Wrap a bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Return the wrapped bus
    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

/// Classify an `embedded-hal` error kind
pub fn bus_error(kind: ErrorKind) -> I2cBusError {
    match kind {
        ErrorKind::Bus => I2cBusError::Bus,
        ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
        ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
        ErrorKind::Overrun => I2cBusError::Overrun,
        _ => I2cBusError::Other,
    }
}

impl<I2C: I2c> I2cBus for HalI2c<I2C> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        self.i2c.write(address, data).map_err(|e| bus_error(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, NoAcknowledgeSource, Operation};
    use heapless::Vec;

    /// Fake bus: accepts writes to one address, NACKs everything else
    struct FakeI2c {
        address: u8,
        received: Vec<u8, 32>,
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.address {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => self
                        .received
                        .extend_from_slice(bytes)
                        .map_err(|_| ErrorKind::Overrun)?,
                    Operation::Read(_) => return Err(ErrorKind::Other),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_passes_through() {
        let mut bus = HalI2c::new(FakeI2c {
            address: 0x38,
            received: Vec::new(),
        });
        bus.write(0x38, &[0xC8, 0x80, 0x60]).unwrap();
        assert_eq!(bus.into_inner().received.as_slice(), &[0xC8, 0x80, 0x60]);
    }

    #[test]
    fn test_error_mapping() {
        let mut bus = HalI2c::new(FakeI2c {
            address: 0x38,
            received: Vec::new(),
        });
        assert_eq!(bus.write(0x39, &[0x00]), Err(I2cBusError::Nack));
        assert_eq!(bus_error(ErrorKind::ArbitrationLoss), I2cBusError::ArbitrationLost);
        assert_eq!(bus_error(ErrorKind::Other), I2cBusError::Other);
    }
}
