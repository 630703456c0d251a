use crate::cpu::{Cpu, Flag, Reg};
use crate::io::{IoCallbacks, IoDevice, NullIo};
use crate::memory::Memory;

/// A complete 8080 system: CPU core, 64 KiB of flat memory, and the
/// attached port device.
///
/// This is the public face of the core. A fresh system is in the reset
/// state (registers zero, flag byte 0x02, memory zeroed, running) with
/// the empty backplane attached. The system is strictly sequential:
/// `step` advances by exactly one instruction and is not re-entrant,
/// and a port device must never call back into the system it is
/// attached to.
pub struct System<IO = NullIo> {
    cpu: Cpu,
    memory: Memory,
    io: IO,
}

impl System<NullIo> {
    pub fn new() -> Self {
        Self::with_io(NullIo)
    }
}

impl Default for System<NullIo> {
    fn default() -> Self {
        Self::new()
    }
}

impl<IO: IoDevice> System<IO> {
    /// A system in the reset state with `io` on the ports.
    pub fn with_io(io: IO) -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(),
            io,
        }
    }

    /// Replace the port device, keeping CPU and memory state.
    pub fn attach_io<J: IoDevice>(self, io: J) -> System<J> {
        System {
            cpu: self.cpu,
            memory: self.memory,
            io,
        }
    }

    /// Replace the port device with a pair of bare closures.
    pub fn attach_callbacks<I, O>(self, input: I, output: O) -> System<IoCallbacks<I, O>>
    where
        I: FnMut(u8) -> u8,
        O: FnMut(u8, u8),
    {
        self.attach_io(IoCallbacks::new(input, output))
    }

    /// Back to power-on: registers zero, flag byte 0x02, memory
    /// cleared, running. The attached device is kept as-is.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.memory.clear();
    }

    /// Execute one instruction; a no-op returning `false` when halted.
    pub fn step(&mut self) -> bool {
        self.cpu.step(&mut self.memory, &mut self.io)
    }

    /// Run up to `budget` instructions, stopping early on halt.
    /// Returns the number of instructions retired.
    pub fn run(&mut self, budget: usize) -> usize {
        let mut retired = 0;
        while retired < budget && self.step() {
            retired += 1;
        }
        retired
    }

    pub fn halted(&self) -> bool {
        self.cpu.halted()
    }

    pub fn peek(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub fn poke(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    /// Copy `data` into memory starting at `base`, wrapping mod 2^16.
    pub fn load(&mut self, base: u16, data: &[u8]) {
        self.memory.load(base, data);
    }

    /// Read a register, pair, or the flag byte by name.
    ///
    /// Eight-bit names yield values in 0..=255.
    pub fn read_register(&self, reg: Reg) -> u16 {
        let regs = &self.cpu.regs;
        match reg {
            Reg::A => regs.a.into(),
            Reg::B => regs.b.into(),
            Reg::C => regs.c.into(),
            Reg::D => regs.d.into(),
            Reg::E => regs.e.into(),
            Reg::H => regs.h.into(),
            Reg::L => regs.l.into(),
            Reg::Flags => self.cpu.flags.to_byte().into(),
            Reg::Sp => regs.sp,
            Reg::Pc => regs.pc,
            Reg::Bc => regs.bc(),
            Reg::De => regs.de(),
            Reg::Hl => regs.hl(),
            Reg::Psw => u16::from_be_bytes([regs.a, self.cpu.flags.to_byte()]),
        }
    }

    /// Write a register, pair, or the flag byte by name.
    ///
    /// The value is truncated to the target's width; writes that touch
    /// the flag byte re-assert its fixed bits.
    pub fn write_register(&mut self, reg: Reg, value: u16) {
        let byte = value as u8;
        match reg {
            Reg::A => self.cpu.regs.a = byte,
            Reg::B => self.cpu.regs.b = byte,
            Reg::C => self.cpu.regs.c = byte,
            Reg::D => self.cpu.regs.d = byte,
            Reg::E => self.cpu.regs.e = byte,
            Reg::H => self.cpu.regs.h = byte,
            Reg::L => self.cpu.regs.l = byte,
            Reg::Flags => self.cpu.flags.set_byte(byte),
            Reg::Sp => self.cpu.regs.sp = value,
            Reg::Pc => self.cpu.regs.pc = value,
            Reg::Bc => self.cpu.regs.set_bc(value),
            Reg::De => self.cpu.regs.set_de(value),
            Reg::Hl => self.cpu.regs.set_hl(value),
            Reg::Psw => {
                let [a, flag_byte] = value.to_be_bytes();
                self.cpu.regs.a = a;
                self.cpu.flags.set_byte(flag_byte);
            }
        }
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.cpu.flags.get(flag)
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.cpu.flags.set(flag, value);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }
}
