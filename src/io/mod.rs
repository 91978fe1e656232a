//! I/O Adapters around the Analysis Core
//!
//! The core never touches the filesystem. Waveforms arrive through a
//! [`WaveformSource`]; finished results leave through a [`ResultWriter`].
//! Binary scope-trace decoders plug in by implementing `WaveformSource`.

mod source;
mod writer;

pub use source::{find_waveform_files, TextWaveformSource, WaveformSource};
pub use writer::{ResultWriter, WriteError, WrittenFiles};
