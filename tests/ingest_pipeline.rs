//! End-to-end ingest through the public API.
//!
//! Bytes go through a StreamSource reader thread, come back as text chunks,
//! and are fed into a LineIngestor and GestureStateStore, the same path the
//! viewer takes each frame.

use std::io::Read;
use std::time::{Duration, Instant};
use stringfield::ingest::LineIngestor;
use stringfield::source::{Incoming, LinkStatus, StreamSource};
use stringfield::state::GestureStateStore;

/// Reader that hands out at most `step` bytes per call.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    step: usize,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let end = (self.pos + self.step).min(self.data.len());
        let n = (end - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Hand polled items to the ingestor the way the viewer does.
fn feed_items(items: Vec<Incoming>, ingestor: &mut LineIngestor, store: &mut GestureStateStore) {
    for item in items {
        match item {
            Incoming::Text(text) => {
                ingestor.feed(&text, store);
            }
            Incoming::LinkLost => ingestor.discard_pending(),
        }
    }
}

/// Run `source` to completion, feeding every chunk into a fresh store.
fn ingest_all(mut source: StreamSource) -> (LineIngestor, GestureStateStore) {
    let mut ingestor = LineIngestor::new();
    let mut store = GestureStateStore::new();
    let deadline = Instant::now() + Duration::from_secs(5);

    while source.is_live() && Instant::now() < deadline {
        feed_items(source.poll(), &mut ingestor, &mut store);
        std::thread::sleep(Duration::from_millis(2));
    }
    feed_items(source.poll(), &mut ingestor, &mut store);
    assert_eq!(source.status(), LinkStatus::Ended);

    (ingestor, store)
}

#[test]
fn full_scale_pluck_registers_at_velocity_one() {
    let source = StreamSource::from_reader(&b"{\"gesture\":\"pluck\",\"value\":127}\n"[..]);
    let (_, store) = ingest_all(source);
    assert_eq!(store.gesture(), "PLUCK");
    assert_eq!(store.velocity(), 1.0);
}

#[test]
fn byte_at_a_time_stream_matches_whole_stream() {
    let text = "{\"gesture\":\"bow\",\"value\":64}\nnot json\n{\"gesture\":\"mute\",\"value\":10}\n{\"value\":50}\n";
    let trickle = Trickle {
        data: text.as_bytes().to_vec(),
        pos: 0,
        step: 1,
    };

    let (ingestor, store) = ingest_all(StreamSource::from_reader(trickle));

    let history: Vec<&str> = store.history().iter().map(|e| e.gesture()).collect();
    assert_eq!(history, vec!["MUTE", "BOW"]);
    assert!((store.velocity() - 10.0 / 127.0).abs() < 1e-12);
    assert_eq!(ingestor.stats().dropped, 2);
    assert_eq!(ingestor.stats().registered, 2);
}

#[test]
fn multibyte_gesture_names_survive_byte_splits() {
    // 'é' and 'ø' are two bytes each in UTF-8
    let text = "{\"gesture\":\"pizzé\",\"value\":127}\n{\"gesture\":\"strøm\",\"value\":0}\n";
    let trickle = Trickle {
        data: text.as_bytes().to_vec(),
        pos: 0,
        step: 3,
    };

    let (ingestor, store) = ingest_all(StreamSource::from_reader(trickle));

    let history: Vec<&str> = store.history().iter().map(|e| e.gesture()).collect();
    assert_eq!(history, vec!["STRØM", "PIZZÉ"]);
    assert_eq!(ingestor.stats().dropped, 0);
}

#[test]
fn eight_gestures_keep_newest_six() {
    let text: String = (1..=8)
        .map(|i| format!("{{\"gesture\":\"g{}\",\"value\":{}}}\n", i, i * 10))
        .collect();
    let (_, store) = ingest_all(StreamSource::from_reader(std::io::Cursor::new(text)));

    let history: Vec<&str> = store.history().iter().map(|e| e.gesture()).collect();
    assert_eq!(history, vec!["G8", "G7", "G6", "G5", "G4", "G3"]);
}

#[test]
fn unterminated_last_line_stays_pending() {
    let source = StreamSource::from_reader(&b"{\"gesture\":\"scrape\",\"value\":40}"[..]);
    let (ingestor, store) = ingest_all(source);

    assert_eq!(store.gesture(), "idle");
    assert!(store.history().is_empty());
    assert_eq!(ingestor.pending(), "{\"gesture\":\"scrape\",\"value\":40}");
}
