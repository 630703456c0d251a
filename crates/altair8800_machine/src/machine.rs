use altair8800_cpu::{IoDevice, Reg, System};

use crate::sio::{Sio, SIO_DATA_PORT, SIO_STATUS_PORT};

#[cfg(test)]
mod tests;

/// Front-panel sense switch port. IN 0xFF reads the eight toggle
/// switches, the classic way Altair software picks a boot option or
/// terminal configuration.
pub const SENSE_SWITCH_PORT: u8 = 0xFF;

/// The Altair backplane as seen from the CPU's port space: the first
/// 2SIO channel and the front-panel sense switches. Every other port
/// reads 0x00 and swallows writes.
#[derive(Debug, Default)]
pub struct AltairIo {
    pub sio: Sio,
    pub sense_switches: u8,
}

impl IoDevice for AltairIo {
    fn port_in(&mut self, port: u8) -> u8 {
        match port {
            SIO_STATUS_PORT => self.sio.status(),
            SIO_DATA_PORT => self.sio.read_data(),
            SENSE_SWITCH_PORT => self.sense_switches,
            _ => 0x00,
        }
    }

    fn port_out(&mut self, port: u8, value: u8) {
        match port {
            SIO_STATUS_PORT => self.sio.write_control(value),
            SIO_DATA_PORT => self.sio.write_data(value),
            _ => {}
        }
    }
}

/// A minimal Altair 8800: the 8080 system with the 2SIO console and
/// the front-panel sense switches wired onto its ports.
///
/// The machine loads raw guest images (a monitor, a test program)
/// anywhere in the 64 KiB space and exchanges console traffic as byte
/// streams. There is no disk controller and no timing model; the guest
/// runs as fast as the host steps it.
pub struct Altair {
    system: System<AltairIo>,
}

impl Altair {
    /// A machine in the powered-on, reset state with all sense
    /// switches down.
    pub fn new() -> Self {
        Self::with_sense_switches(0x00)
    }

    /// A machine with the front-panel sense switches preset.
    pub fn with_sense_switches(sense_switches: u8) -> Self {
        let io = AltairIo {
            sio: Sio::new(),
            sense_switches,
        };
        Self {
            system: System::new().attach_io(io),
        }
    }

    /// Copy a guest image into memory at `origin` and point the CPU at
    /// it.
    pub fn load_image(&mut self, origin: u16, image: &[u8]) {
        log::debug!(
            "loading {} byte image at {origin:#06X}",
            image.len()
        );
        self.system.load(origin, image);
        self.system.write_register(Reg::Pc, origin);
    }

    /// Move the CPU's entry point without touching memory.
    pub fn set_entry(&mut self, addr: u16) {
        self.system.write_register(Reg::Pc, addr);
    }

    /// Queue console input for the guest to read through the 2SIO.
    pub fn feed_console(&mut self, bytes: &[u8]) {
        self.system.io_mut().sio.queue_input(bytes);
    }

    /// Drain everything the guest has written to the console so far.
    pub fn take_console_output(&mut self) -> Vec<u8> {
        self.system.io_mut().sio.take_output()
    }

    /// Reposition the front-panel sense switches.
    pub fn set_sense_switches(&mut self, value: u8) {
        self.system.io_mut().sense_switches = value;
    }

    /// Run up to `budget` instructions, stopping early on HLT.
    /// Returns the number of instructions retired.
    pub fn run(&mut self, budget: usize) -> usize {
        let retired = self.system.run(budget);
        if self.system.halted() {
            log::debug!("guest halted after {retired} instructions");
        }
        retired
    }

    /// Execute a single instruction; `false` when halted.
    pub fn step(&mut self) -> bool {
        self.system.step()
    }

    pub fn halted(&self) -> bool {
        self.system.halted()
    }

    /// Front-panel style reset: the CPU restarts at 0x0000 but memory
    /// and the loaded guest image survive. Pending console traffic is
    /// discarded; the sense switches keep their position.
    pub fn reset(&mut self) {
        let sense_switches = self.system.io().sense_switches;
        *self.system.io_mut() = AltairIo {
            sio: Sio::new(),
            sense_switches,
        };
        // CPU-only reset; System::reset would also clear memory.
        self.system.cpu_mut().reset();
    }

    /// Direct access to the underlying 8080 system.
    pub fn system(&self) -> &System<AltairIo> {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut System<AltairIo> {
        &mut self.system
    }
}

impl Default for Altair {
    fn default() -> Self {
        Self::new()
    }
}
