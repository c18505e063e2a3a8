//! NXP PCF8576 segment LCD driver
//!
//! Universal LCD driver for low multiplex rates: 40 segment outputs, up to
//! four backplanes, I2C interface. The driver keeps the 20-byte display RAM
//! in a local mirror and rewrites all of it on every flush.

use pcflcd_core::config::{ChipConfig, CMD_CONTINUE, CMD_LOAD_DATA_POINTER};
use pcflcd_core::ram::{DisplayRam, RAM_SIZE};
use pcflcd_core::traits::{LcdError, SegmentLcd};
use pcflcd_hal::I2cBus;

/// Bytes in one flush transfer: data pointer, device select, RAM
const FRAME_LEN: usize = RAM_SIZE + 2;

/// PCF8576 driver
pub struct Pcf8576<B> {
    bus: B,
    config: ChipConfig,
    ram: DisplayRam,
}

impl<B: I2cBus> Pcf8576<B> {
    /// Create a new driver; nothing is sent until [`init`](Self::init)
    pub fn new(bus: B, config: ChipConfig) -> Self {
        Self {
            bus,
            config,
            ram: DisplayRam::new(),
        }
    }

    /// Configure the controller and blank the glass
    ///
    /// Sends mode set (bias, multiplex, power mode, display on), resets the
    /// data pointer, selects the device, then flushes an empty RAM.
    pub fn init(&mut self) -> Result<(), LcdError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("PCF8576 @{=u8:#x}: initializing", self.config.address);

        if !self.config.is_valid_address() {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "Invalid I2C address for PCF8576. Expected {=u8:#x} or {=u8:#x}, found {=u8:#x}",
                pcflcd_core::config::BASE_ADDRESS,
                pcflcd_core::config::BASE_ADDRESS | 1,
                self.config.address
            );
            return Err(LcdError::InvalidAddress);
        }

        let sequence = self.config.init_sequence();
        if let Err(e) = self.bus.write(self.config.address, &sequence) {
            #[cfg(feature = "defmt")]
            defmt::error!("PCF8576 @{=u8:#x}: mode set failed: {}", self.config.address, e);
            return Err(e.into());
        }

        self.ram.clear();
        self.flush()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("PCF8576 @{=u8:#x}: initialization OK", self.config.address);
        Ok(())
    }

    /// Controller settings
    pub fn config(&self) -> &ChipConfig {
        &self.config
    }

    /// Consume the driver and return the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Build the flush transfer
    ///
    /// The data pointer command carries the continuation bit; device select
    /// does not, so everything after it is display data.
    fn frame(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[0] = CMD_CONTINUE | CMD_LOAD_DATA_POINTER;
        frame[1] = self.config.device_select();
        frame[2..].copy_from_slice(self.ram.as_bytes());
        frame
    }
}

impl<B: I2cBus> SegmentLcd for Pcf8576<B> {
    fn ram(&self) -> &DisplayRam {
        &self.ram
    }

    fn ram_mut(&mut self) -> &mut DisplayRam {
        &mut self.ram
    }

    fn flush(&mut self) -> Result<(), LcdError> {
        let frame = self.frame();
        if let Err(e) = self.bus.write(self.config.address, &frame) {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "Writing to PCF8576 device @{=u8:#x} has failed: {}",
                self.config.address,
                e
            );
            return Err(LcdError::Bus(e));
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("display_ram: {=[u8]:x}", &self.ram.as_bytes()[..]);
        Ok(())
    }
}
