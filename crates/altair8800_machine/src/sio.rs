use std::collections::VecDeque;

/// Control/status port of the first 2SIO channel.
pub const SIO_STATUS_PORT: u8 = 0x10;
/// Data port of the first 2SIO channel.
pub const SIO_DATA_PORT: u8 = 0x11;

/// Status bit: receive data register full (a byte is waiting).
const STATUS_RX_FULL: u8 = 0x01;
/// Status bit: transmit data register empty (ready to send).
const STATUS_TX_EMPTY: u8 = 0x02;

/// One channel of the MITS 88-2SIO serial board.
///
/// Guest programs poll the status port until bit 0 reports a waiting
/// byte, then read it from the data port; transmitted bytes are
/// buffered on the host side until drained. Transmission is always
/// ready: the host consumes output instantly, so bit 1 stays set.
/// Writes to the control port (UART configuration on real hardware)
/// are accepted and ignored.
#[derive(Debug, Default)]
pub struct Sio {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl Sio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the status port.
    pub fn status(&self) -> u8 {
        let mut status = STATUS_TX_EMPTY;
        if !self.rx.is_empty() {
            status |= STATUS_RX_FULL;
        }
        status
    }

    /// Guest read of the data port. Reading with nothing waiting
    /// yields 0x00, as an unprogrammed ACIA data register does.
    pub fn read_data(&mut self) -> u8 {
        self.rx.pop_front().unwrap_or(0x00)
    }

    /// Guest write of the data port.
    pub fn write_data(&mut self, value: u8) {
        self.tx.push(value);
    }

    /// Guest write of the control port. UART configuration is not
    /// modelled.
    pub fn write_control(&mut self, _value: u8) {}

    /// Queue bytes for the guest to receive.
    pub fn queue_input(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Drain everything the guest has transmitted so far.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }

    /// Transmitted bytes not yet drained.
    pub fn output(&self) -> &[u8] {
        &self.tx
    }

    /// Number of input bytes the guest has not consumed yet.
    pub fn pending_input(&self) -> usize {
        self.rx.len()
    }
}
