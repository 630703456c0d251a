use std::io::{Read, Write};

/// Hand-assembled console echo monitor (see demos/README.md).
const DEFAULT_IMAGE_PATH: &str = "demos/echo.bin";

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut image_path = args.next().unwrap_or_default();
    if image_path.is_empty() {
        image_path = DEFAULT_IMAGE_PATH.to_string();
        log::info!("no image path provided, using default: {}", image_path);
    }
    let origin = args.next().map(|s| parse_hex(&s)).unwrap_or(0);

    // The console is a batch stream: everything on stdin is queued for
    // the guest before it starts, and the guest's output lands on
    // stdout after the run.
    let mut console_input = Vec::new();
    std::io::stdin().read_to_end(&mut console_input).unwrap();

    let config = altair8800::RunConfig::builder()
        .image_path(image_path)
        .origin(origin)
        .console_input(console_input)
        .build();
    let summary = altair8800::run(config).unwrap();

    std::io::stdout().write_all(&summary.console_output).unwrap();
    log::info!(
        "{} instructions retired ({}); {}",
        summary.retired,
        if summary.halted {
            "halted"
        } else {
            "budget exhausted"
        },
        summary.registers
    );
}

fn parse_hex(text: &str) -> u16 {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).expect("load address must be hexadecimal")
}
