//! Synthetic vital-sign generators and the sinks they write to.
//!
//! Generators random-walk per patient so consecutive readings look like a
//! real signal, with ranges wide enough to cross the alert thresholds now
//! and then. No detection logic lives here.

pub mod generators;
pub mod sinks;
pub mod tcp;

pub use generators::{
    CardiacRhythmGenerator, HeartRateGenerator, ManualAlertGenerator, PressureGenerator,
    SaturationGenerator, VitalGenerator,
};
pub use sinks::{format_wire_line, ConsoleSink, FileSink, OutputSink, StoreSink};
pub use tcp::TcpSink;
