//! Device transport with reconnect.
//!
//! Opens a device path, streams it until it ends or fails, then optionally
//! waits and opens it again. Character devices such as `/dev/ttyACM0` are
//! opened as serial ports at the configured baud rate; FIFOs and plain files
//! are read directly. A player unplugging the board mid-demo shows up as a link
//! status change, never as an error in the viewer.

use super::stream::{pump, PumpEnd, SourceEvent};
use serialport::{DataBits, FlowControl, Parity, SerialPortBuilder, StopBits};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default wait between reconnect attempts.
pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_millis(1000);

/// Line speed of the instrument firmware.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// How long one serial read waits before returning with no data.
pub(crate) const SERIAL_READ_TIMEOUT: Duration = Duration::from_millis(100);

/// What to do when the device stream ends or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Reopen the device after it goes away.
    pub enabled: bool,
    /// Wait between attempts.
    pub interval: Duration,
}

impl ReconnectPolicy {
    /// Read the device once and stop.
    pub fn never() -> Self {
        Self {
            enabled: false,
            interval: DEFAULT_RECONNECT_INTERVAL,
        }
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: DEFAULT_RECONNECT_INTERVAL,
        }
    }
}

/// How to open and keep reading a device path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceOptions {
    /// Serial line speed. Ignored for FIFOs and plain files.
    pub baud_rate: u32,
    /// Behavior after the device goes away.
    pub reconnect: ReconnectPolicy,
}

impl DeviceOptions {
    /// Default line speed, no reconnect.
    pub fn read_once() -> Self {
        Self {
            reconnect: ReconnectPolicy::never(),
            ..Self::default()
        }
    }
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            reconnect: ReconnectPolicy::default(),
        }
    }
}

/// What a device path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeviceKind {
    /// Character device, opened as a serial port.
    Serial,
    /// Regular file. Its end is the end of the input.
    File,
    /// FIFO or other readable node. EOF means the writer went away.
    Pipe,
}

impl DeviceKind {
    pub(crate) fn of(metadata: &fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_file() {
            DeviceKind::File
        } else if is_serial(&file_type) {
            DeviceKind::Serial
        } else {
            DeviceKind::Pipe
        }
    }
}

#[cfg(unix)]
fn is_serial(file_type: &fs::FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;
    file_type.is_char_device()
}

#[cfg(not(unix))]
fn is_serial(_file_type: &fs::FileType) -> bool {
    true
}

/// Serial settings for the instrument: 8 data bits, no parity, one stop bit,
/// no flow control.
pub(crate) fn serial_builder(path: &Path, baud_rate: u32) -> SerialPortBuilder {
    serialport::new(path.to_string_lossy(), baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(SERIAL_READ_TIMEOUT)
}

/// Open `path` the way its node type needs.
fn open(path: &Path, baud_rate: u32) -> io::Result<(Box<dyn Read + Send>, DeviceKind)> {
    let kind = DeviceKind::of(&fs::metadata(path)?);
    let reader: Box<dyn Read + Send> = match kind {
        DeviceKind::Serial => Box::new(serial_builder(path, baud_rate).open()?),
        DeviceKind::File | DeviceKind::Pipe => Box::new(File::open(path)?),
    };
    Ok((reader, kind))
}

/// Connect/read/reconnect loop. Runs on the reader thread.
///
/// Returns when the receiving [`super::StreamSource`] is dropped, when a
/// regular file has been read to its end, or after the first disconnect when
/// reconnecting is disabled.
pub(crate) fn run(path: &Path, options: DeviceOptions, tx: &Sender<SourceEvent>) {
    let policy = options.reconnect;
    let mut failed_opens: u32 = 0;

    loop {
        let reason = match open(path, options.baud_rate) {
            Ok((mut device, kind)) => {
                failed_opens = 0;
                info!(
                    path = %path.display(),
                    ?kind,
                    baud = options.baud_rate,
                    "Device connected"
                );
                if tx.send(SourceEvent::Connected).is_err() {
                    return;
                }
                let reason = match pump(&mut device, tx) {
                    PumpEnd::ReceiverGone => return,
                    PumpEnd::Eof if kind == DeviceKind::File => {
                        info!(path = %path.display(), "Reached end of file");
                        let _ = tx.send(SourceEvent::Ended);
                        return;
                    }
                    PumpEnd::Eof => "end of stream".to_string(),
                    PumpEnd::Failed(e) => e.to_string(),
                };
                warn!(path = %path.display(), %reason, "Device disconnected");
                reason
            }
            Err(e) => {
                failed_opens += 1;
                if failed_opens == 1 {
                    warn!(path = %path.display(), error = %e, "Device unavailable");
                } else {
                    debug!(path = %path.display(), attempt = failed_opens, "Device still unavailable");
                }
                e.to_string()
            }
        };

        if tx.send(SourceEvent::Disconnected { reason }).is_err() {
            return;
        }

        if !policy.enabled {
            let _ = tx.send(SourceEvent::Ended);
            return;
        }
        thread::sleep(policy.interval);
    }
}
