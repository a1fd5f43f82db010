//! Distance Reporter Host Monitor
//!
//! This binary runs on your PC and prints the distance reports the RP2350
//! (or an Arduino running the same sketch) writes to its serial port.
//!
//! ## Usage
//!
//! ```bash
//! # List available serial ports
//! cargo run --features std --bin sharp_monitor -- --list-ports
//!
//! # Connect to device (auto-detects RP2350 / Arduino USB serial)
//! cargo run --features std --bin sharp_monitor
//!
//! # Connect to specific port and baud rate
//! cargo run --features std --bin sharp_monitor -- --port /dev/ttyUSB0 --baud 9600
//! ```
//!
//! ## Output
//!
//! ```text
//! Distance in cm: 12.34
//! Out of range
//! Ignored invalid line: ??x
//! ```

use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;

use sharp_ir::report_protocol::Report;
use sharp_ir::sensor_loop::LoopConfig;

/// Raspberry Pi USB vendor ID (RP2350 boards, debug probes)
const RASPBERRY_PI_VID: u16 = 0x2e8a;

/// Arduino USB vendor ID
const ARDUINO_VID: u16 = 0x2341;

/// How long a single read may block before it is retried
const READ_TIMEOUT: Duration = Duration::from_millis(1000);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    // Parse arguments
    if args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_help();
        return Ok(());
    }

    if args.contains(&"--list-ports".to_string()) {
        list_ports()?;
        return Ok(());
    }

    let baud_rate = match flag_value(&args, "--baud") {
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| format!("Invalid baud rate: {}", value))?,
        None => LoopConfig::DEFAULT.baud_rate,
    };

    let port_name = match flag_value(&args, "--port") {
        Some(name) => Some(name.to_string()),
        None => find_device_port(),
    };

    let port_name = match port_name {
        Some(name) => name,
        None => {
            eprintln!("Error: No distance reporter found");
            eprintln!("Use --list-ports to see available ports");
            eprintln!("Or specify port with --port <PORT>");
            return Err("No device found".into());
        }
    };

    // On Windows, COM ports >= 10 need the \\.\COMxx format
    #[cfg(target_os = "windows")]
    let port_name = if port_name.starts_with("COM") && !port_name.starts_with(r"\\") {
        format!(r"\\.\{}", port_name)
    } else {
        port_name
    };

    print!("Connecting to {} at {} baud...", port_name, baud_rate);
    io::stdout().flush()?;

    let port = serialport::new(&port_name, baud_rate)
        .timeout(READ_TIMEOUT)
        .flow_control(serialport::FlowControl::None)
        .open()?;

    println!(" opened!");
    println!("Reading distance reports (Ctrl+C to stop)\n");

    let mut stdout = io::stdout();
    monitor(BufReader::new(port), &mut stdout)?;
    println!("Port closed.");

    Ok(())
}

/// Print one message per received line until the stream ends
///
/// Lines are split on `\n` and decoded lossily, so line noise (wrong baud
/// rate, connect-time glitches) is reported as an invalid line instead of
/// ending the session. A read timeout keeps the partial line and retries.
fn monitor<R: BufRead, W: Write>(mut reader: R, out: &mut W) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return Ok(()),
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if let Some(message) = describe_line(&line) {
                    writeln!(out, "{}", message)?;
                    out.flush()?;
                }
                buf.clear();
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Value following `flag` on the command line
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).map(String::as_str)
}

/// Human-readable rendering of one received line, `None` for blank lines
fn describe_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(match Report::parse_line(trimmed).map(|r| r.distance_cm()) {
        Ok(Some(distance_cm)) => format!("Distance in cm: {:.2}", distance_cm),
        Ok(None) => "Out of range".to_string(),
        Err(_) => format!("Ignored invalid line: {}", trimmed),
    })
}

fn is_reporter_vid(vid: u16) -> bool {
    vid == RASPBERRY_PI_VID || vid == ARDUINO_VID
}

fn list_ports() -> Result<(), serialport::Error> {
    let ports = serialport::available_ports()?;

    println!("Serial ports:");
    if ports.is_empty() {
        println!("  (none)");
    }
    for port in &ports {
        println!("  {}", describe_port(port));
    }
    Ok(())
}

/// One-line summary of a port, marking likely distance reporters with `*`
fn describe_port(port: &serialport::SerialPortInfo) -> String {
    use serialport::SerialPortType;

    let (kind, candidate) = match &port.port_type {
        SerialPortType::UsbPort(info) => {
            let label = info
                .product
                .as_deref()
                .or(info.manufacturer.as_deref())
                .unwrap_or("unnamed");
            (
                format!("usb {:04x}:{:04x} {}", info.vid, info.pid, label),
                is_reporter_vid(info.vid),
            )
        }
        SerialPortType::PciPort => ("pci".to_string(), false),
        SerialPortType::BluetoothPort => ("bluetooth".to_string(), false),
        SerialPortType::Unknown => ("unknown".to_string(), false),
    };

    let marker = if candidate { '*' } else { ' ' };
    format!("{} {:<20} {}", marker, port.port_name, kind)
}

fn find_device_port() -> Option<String> {
    serialport::available_ports()
        .ok()?
        .into_iter()
        .find(|port| match &port.port_type {
            serialport::SerialPortType::UsbPort(info) => is_reporter_vid(info.vid),
            _ => false,
        })
        .map(|port| port.port_name)
}

fn print_help() {
    println!("sharp_monitor - print distance reports from a serial port");
    println!();
    println!("Options:");
    println!("  --list-ports      List available serial ports (* = likely reporter)");
    println!("  --port <PORT>     Serial port to open (default: auto-detect)");
    println!("  --baud <RATE>     Baud rate (default: {})", LoopConfig::DEFAULT.baud_rate);
    println!("  -h, --help        Show this help");
}
