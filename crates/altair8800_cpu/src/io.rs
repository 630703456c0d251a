/// Port-mapped I/O hook points for the IN and OUT instructions.
///
/// The defaults model an empty backplane: IN reads 0x00 and OUT drops
/// the byte. Machines implement this trait to wire real devices onto
/// the 256 ports. Callbacks run on the caller's thread inside `step`
/// and must not re-enter the CPU they were invoked from.
pub trait IoDevice {
    /// IN: produce the byte read from `port`.
    fn port_in(&mut self, port: u8) -> u8 {
        let _ = port;
        0x00
    }

    /// OUT: accept the byte written to `port`.
    fn port_out(&mut self, port: u8, value: u8) {
        let _ = (port, value);
    }
}

/// The empty backplane: every IN reads 0x00, every OUT is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullIo;

impl IoDevice for NullIo {}

/// Adapter wiring a pair of closures as a port device.
///
/// `input` handles IN, `output` handles OUT.
pub struct IoCallbacks<I, O> {
    input: I,
    output: O,
}

impl<I, O> IoCallbacks<I, O>
where
    I: FnMut(u8) -> u8,
    O: FnMut(u8, u8),
{
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

impl<I, O> IoDevice for IoCallbacks<I, O>
where
    I: FnMut(u8) -> u8,
    O: FnMut(u8, u8),
{
    fn port_in(&mut self, port: u8) -> u8 {
        (self.input)(port)
    }

    fn port_out(&mut self, port: u8, value: u8) {
        (self.output)(port, value)
    }
}
