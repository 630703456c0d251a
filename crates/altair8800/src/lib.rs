use std::fmt;

use anyhow::Result;
use typed_builder::TypedBuilder;

use altair8800_cpu::Reg;
use altair8800_machine::Altair;

/// Instruction budget used when the caller does not set one. Plenty
/// for a monitor session; a runaway guest stops here instead of
/// spinning forever.
pub const DEFAULT_BUDGET: usize = 50_000_000;

/// Everything needed to bring the machine up and run one guest image.
#[derive(TypedBuilder)]
pub struct RunConfig {
    /// Path of the raw guest image.
    pub image_path: String,
    /// Load address of the image.
    #[builder(default = 0)]
    pub origin: u16,
    /// Entry point; defaults to the origin.
    #[builder(default, setter(strip_option))]
    pub entry: Option<u16>,
    /// Maximum number of instructions to retire.
    #[builder(default = DEFAULT_BUDGET)]
    pub budget: usize,
    /// Front-panel sense switch byte (IN 0xFF).
    #[builder(default = 0)]
    pub sense_switches: u8,
    /// Bytes queued on the console before the guest starts.
    #[builder(default)]
    pub console_input: Vec<u8>,
}

/// Snapshot of the register file after a run.
#[derive(Clone, Copy, Debug)]
pub struct RegisterDump {
    pub a: u8,
    pub flags: u8,
    pub bc: u16,
    pub de: u16,
    pub hl: u16,
    pub sp: u16,
    pub pc: u16,
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A={:02X} F={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
            self.a, self.flags, self.bc, self.de, self.hl, self.sp, self.pc
        )
    }
}

/// Outcome of one bounded run.
pub struct RunSummary {
    pub retired: usize,
    pub halted: bool,
    pub console_output: Vec<u8>,
    pub registers: RegisterDump,
}

/// Load the image, run the Altair until HLT or budget exhaustion, and
/// collect what the guest wrote to the console.
pub fn run(config: RunConfig) -> Result<RunSummary> {
    let image = std::fs::read(&config.image_path)?;
    log::info!("loaded {} bytes from {}", image.len(), config.image_path);
    if log::log_enabled!(log::Level::Debug) {
        let window = &image[..image.len().min(256)];
        log::debug!("image head:\n{}", hex_dump(window, config.origin));
    }

    let mut altair = Altair::with_sense_switches(config.sense_switches);
    altair.load_image(config.origin, &image);
    if let Some(entry) = config.entry {
        altair.set_entry(entry);
    }
    altair.feed_console(&config.console_input);

    let retired = altair.run(config.budget);
    let halted = altair.halted();
    if !halted {
        log::warn!("instruction budget of {} exhausted before HLT", config.budget);
    }

    let system = altair.system();
    let registers = RegisterDump {
        a: system.read_register(Reg::A) as u8,
        flags: system.read_register(Reg::Flags) as u8,
        bc: system.read_register(Reg::Bc),
        de: system.read_register(Reg::De),
        hl: system.read_register(Reg::Hl),
        sp: system.read_register(Reg::Sp),
        pc: system.read_register(Reg::Pc),
    };
    Ok(RunSummary {
        retired,
        halted,
        console_output: altair.take_console_output(),
        registers,
    })
}

/// Format bytes as a classic 16-column hex dump with an ASCII gutter.
pub fn hex_dump(bytes: &[u8], base: u16) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let addr = base.wrapping_add((row * 16) as u16);
        out.push_str(&format!("{addr:04X} "));
        for (i, byte) in chunk.iter().enumerate() {
            let sep = if i == 8 { "  " } else { " " };
            out.push_str(&format!("{sep}{byte:02X}"));
        }
        for i in chunk.len()..16 {
            let sep = if i == 8 { "  " } else { " " };
            out.push_str(sep);
            out.push_str("  ");
        }
        out.push_str("  |");
        for &byte in chunk {
            let c = if (0x20..0x7F).contains(&byte) {
                byte as char
            } else {
                '.'
            };
            out.push(c);
        }
        out.push_str("|\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{hex_dump, RegisterDump, RunConfig, DEFAULT_BUDGET};

    #[test]
    fn config_builder_defaults() {
        let config = RunConfig::builder()
            .image_path("monitor.bin".to_string())
            .build();
        assert_eq!(config.origin, 0);
        assert_eq!(config.entry, None);
        assert_eq!(config.budget, DEFAULT_BUDGET);
        assert_eq!(config.sense_switches, 0);
        assert!(config.console_input.is_empty());
    }

    #[test]
    fn register_dump_formatting() {
        let dump = RegisterDump {
            a: 0x42,
            flags: 0x02,
            bc: 0x0000,
            de: 0x1234,
            hl: 0xABCD,
            sp: 0x0100,
            pc: 0x0004,
        };
        assert_eq!(
            dump.to_string(),
            "A=42 F=02 BC=0000 DE=1234 HL=ABCD SP=0100 PC=0004"
        );
    }

    #[test]
    fn hex_dump_rows_and_ascii_gutter() {
        let bytes: Vec<u8> = (0x41..0x41 + 20).collect();
        let dump = hex_dump(&bytes, 0x0100);
        let mut lines = dump.lines();
        let first = lines.next().unwrap();
        assert!(first.starts_with("0100  41 42 43"));
        assert!(first.ends_with("|ABCDEFGHIJKLMNOP|"));
        let second = lines.next().unwrap();
        assert!(second.starts_with("0110  51 52 53 54"));
        assert!(second.ends_with("|QRST|"));
        assert!(lines.next().is_none());
    }
}
