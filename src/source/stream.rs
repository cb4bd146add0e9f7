//! Background stream reader.
//!
//! Provides StreamSource, the receiving end of a reader thread. The thread
//! owns the blocking `read` calls; the TUI event loop only ever calls the
//! non-blocking [`StreamSource::poll`]. The channel between them serializes
//! every chunk into the single thread that owns the gesture state.

use super::device::{self, DeviceOptions};
use super::utf8::Utf8Chunker;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// Bytes requested per `read` call.
pub(crate) const READ_BUFFER_SIZE: usize = 1024;

/// Transport connection state, as shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// No transport; keyboard triggers only.
    Simulated,
    /// Waiting for the transport to open.
    Connecting,
    /// Reading data.
    Connected,
    /// Lost the transport; a reconnect may follow.
    Disconnected,
    /// No more data will arrive.
    Ended,
}

impl LinkStatus {
    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            LinkStatus::Simulated => "SIM",
            LinkStatus::Connecting => "CONNECTING",
            LinkStatus::Connected => "LINKED",
            LinkStatus::Disconnected => "NO LINK",
            LinkStatus::Ended => "ENDED",
        }
    }
}

/// What [`StreamSource::poll`] hands to the ingest path, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// Decoded text.
    Text(String),
    /// The link dropped. A line left unfinished before this point will never
    /// be completed.
    LinkLost,
}

/// Messages sent from a reader thread to its [`StreamSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceEvent {
    Connected,
    Chunk(String),
    Disconnected { reason: String },
    Ended,
}

/// How a single read loop finished.
#[derive(Debug)]
pub(crate) enum PumpEnd {
    Eof,
    Failed(io::Error),
    ReceiverGone,
}

/// Read `reader` to exhaustion, forwarding decoded text as chunks.
pub(crate) fn pump<R: Read>(reader: &mut R, tx: &Sender<SourceEvent>) -> PumpEnd {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let mut chunker = Utf8Chunker::new();

    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                let rest = chunker.finish();
                if !rest.is_empty() && tx.send(SourceEvent::Chunk(rest)).is_err() {
                    return PumpEnd::ReceiverGone;
                }
                return PumpEnd::Eof;
            }
            Ok(n) => {
                let text = chunker.push(&buf[..n]);
                if !text.is_empty() && tx.send(SourceEvent::Chunk(text)).is_err() {
                    return PumpEnd::ReceiverGone;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // Serial reads time out while the line is idle
            Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
            Err(e) => return PumpEnd::Failed(e),
        }
    }
}

/// Text stream fed by a background reader thread.
///
/// # Design
///
/// - Reader thread does the blocking I/O and UTF-8 reassembly
/// - Non-blocking poll() for TUI event loop integration
/// - Tracks link status from the thread's connect/disconnect reports
/// - Dropping the source closes the channel; the thread exits on its next send
#[derive(Debug)]
pub struct StreamSource {
    rx: Receiver<SourceEvent>,
    status: LinkStatus,
}

impl StreamSource {
    /// Read from the process's stdin until EOF.
    pub fn stdin() -> Self {
        Self::from_reader(io::stdin())
    }

    /// Read from any reader until EOF.
    pub fn from_reader<R: Read + Send + 'static>(mut reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if tx.send(SourceEvent::Connected).is_err() {
                return;
            }
            match pump(&mut reader, &tx) {
                PumpEnd::ReceiverGone => return,
                PumpEnd::Eof => debug!("Input stream reached EOF"),
                PumpEnd::Failed(e) => warn!(error = %e, "Input stream read failed"),
            }
            let _ = tx.send(SourceEvent::Ended);
        });
        Self::from_receiver(rx)
    }

    /// Read from a device path, reopening it after disconnects per `options`.
    pub fn device(path: PathBuf, options: DeviceOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || device::run(&path, options, &tx));
        Self::from_receiver(rx)
    }

    pub(crate) fn from_receiver(rx: Receiver<SourceEvent>) -> Self {
        Self {
            rx,
            status: LinkStatus::Connecting,
        }
    }

    /// Drain everything received since the last poll.
    ///
    /// Non-blocking: returns an empty vec when nothing arrived. Status events
    /// are folded into [`StreamSource::status`]; a disconnect is also reported
    /// in line as [`Incoming::LinkLost`].
    pub fn poll(&mut self) -> Vec<Incoming> {
        let mut chunks = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(SourceEvent::Chunk(text)) => chunks.push(Incoming::Text(text)),
                Ok(SourceEvent::Connected) => self.status = LinkStatus::Connected,
                Ok(SourceEvent::Disconnected { reason }) => {
                    debug!(%reason, "Link down");
                    self.status = LinkStatus::Disconnected;
                    chunks.push(Incoming::LinkLost);
                }
                Ok(SourceEvent::Ended) => self.status = LinkStatus::Ended,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.status = LinkStatus::Ended;
                    break;
                }
            }
        }
        chunks
    }

    /// Current link status as of the last poll.
    pub fn status(&self) -> LinkStatus {
        self.status
    }

    /// Whether more data may still arrive.
    pub fn is_live(&self) -> bool {
        self.status != LinkStatus::Ended
    }
}
