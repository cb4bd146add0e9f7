//! stringfield
//!
//! Terminal visualizer for a gesture-sensing string instrument. Reads
//! newline-delimited JSON gesture messages from a device or stdin, keeps a
//! decaying velocity and a short gesture history, and renders them as an
//! animated string. Without a device, keyboard triggers simulate gestures.
//!
//! Pure core (`model`, `parser`, `state`, `ingest`) / impure shell
//! (`source`, `view`, `logging`).

pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
