use super::Altair;
use altair8800_cpu::Reg;

/// Console echo loop: poll the 2SIO status port, read each byte and
/// write it straight back, halting on Ctrl-Z.
///
/// ```text
/// 0000: DB 10      IN 0x10      ; status
/// 0002: E6 01      ANI 0x01     ; byte waiting?
/// 0004: CA 00 00   JZ 0x0000
/// 0007: DB 11      IN 0x11      ; read it
/// 0009: FE 1A      CPI 0x1A     ; Ctrl-Z ends the session
/// 000B: CA 13 00   JZ 0x0013
/// 000E: D3 11      OUT 0x11     ; echo
/// 0010: C3 00 00   JMP 0x0000
/// 0013: 76         HLT
/// ```
const ECHO_MONITOR: &[u8] = &[
    0xDB, 0x10, 0xE6, 0x01, 0xCA, 0x00, 0x00, 0xDB, 0x11, 0xFE, 0x1A, 0xCA, 0x13, 0x00, 0xD3,
    0x11, 0xC3, 0x00, 0x00, 0x76,
];

#[test]
fn echo_monitor_round_trips_console_bytes() {
    let mut altair = Altair::new();
    altair.load_image(0x0000, ECHO_MONITOR);
    altair.feed_console(b"HELLO\x1A");
    altair.run(10_000);
    assert!(altair.halted());
    assert_eq!(altair.take_console_output(), b"HELLO");
}

#[test]
fn sense_switches_are_readable_on_port_ff() {
    // IN 0xFF; OUT 0x11; HLT
    let program = [0xDB, 0xFF, 0xD3, 0x11, 0x76];
    let mut altair = Altair::with_sense_switches(0b1010_0101);
    altair.load_image(0x0000, &program);
    altair.run(100);
    assert!(altair.halted());
    assert_eq!(altair.take_console_output(), &[0b1010_0101]);
}

#[test]
fn unmapped_ports_read_zero() {
    // IN 0x55; OUT 0x11; HLT
    let program = [0xDB, 0x55, 0xD3, 0x11, 0x76];
    let mut altair = Altair::new();
    altair.load_image(0x0000, &program);
    altair.run(100);
    assert_eq!(altair.take_console_output(), &[0x00]);
}

#[test]
fn images_load_at_their_origin() {
    // MVI A, 0x42; HLT at 0x0100.
    let mut altair = Altair::new();
    altair.load_image(0x0100, &[0x3E, 0x42, 0x76]);
    assert_eq!(altair.system().read_register(Reg::Pc), 0x0100);
    altair.run(100);
    assert!(altair.halted());
    assert_eq!(altair.system().read_register(Reg::A), 0x42);
    assert_eq!(altair.system().read_register(Reg::Pc), 0x0103);
}

#[test]
fn front_panel_reset_preserves_memory() {
    let mut altair = Altair::new();
    altair.load_image(0x0000, ECHO_MONITOR);
    altair.feed_console(b"A\x1A");
    altair.run(10_000);
    assert!(altair.halted());
    altair.take_console_output();

    altair.reset();
    assert!(!altair.halted());
    assert_eq!(altair.system().read_register(Reg::Pc), 0x0000);
    // The image survived the reset: the monitor runs again.
    altair.feed_console(b"B\x1A");
    altair.run(10_000);
    assert!(altair.halted());
    assert_eq!(altair.take_console_output(), b"B");
}

#[test]
fn reset_discards_pending_console_traffic() {
    let mut altair = Altair::new();
    altair.load_image(0x0000, ECHO_MONITOR);
    altair.feed_console(b"STALE");
    altair.reset();
    // Nothing queued any more: the monitor just polls.
    altair.feed_console(b"\x1A");
    altair.run(10_000);
    assert!(altair.halted());
    assert_eq!(altair.take_console_output(), b"");
}
