//! UTF-8 reassembly for byte chunks.
//!
//! A read from a serial line can end in the middle of a multi-byte character.
//! `Utf8Chunker` holds back the incomplete tail until the next read completes it.

/// Decodes a byte stream chunk by chunk without splitting characters.
#[derive(Debug, Default)]
pub struct Utf8Chunker {
    pending: Vec<u8>,
}

impl Utf8Chunker {
    /// Create a chunker with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode as much of `pending + bytes` as possible.
    ///
    /// Invalid sequences become U+FFFD. An incomplete sequence at the very end
    /// is held back for the next call.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::with_capacity(self.pending.len());

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        // Truncated sequence at the end: wait for more bytes
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush whatever is still pending at end of stream.
    pub fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }

    /// Bytes held back waiting for completion.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
