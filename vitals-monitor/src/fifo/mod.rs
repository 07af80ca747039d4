//! Sample transport between the timer ISR and the main loop.
//!
//! ## Components
//!
//! | Type | Producer | Consumer | Description |
//! |------|----------|----------|-------------|
//! | [`SampleFifo`] | generator tick | dispatch loop | Lock-free SPSC ring of `u8` samples |
//!
//! ## Sizing
//!
//! Capacity must cover the longest main-loop stall the application expects:
//! `tick period × generation interval × N ≥ worst-case consumer latency`.
//! When the bound is exceeded the newest samples are dropped; nothing
//! blocks and nothing is reported apart from
//! [`overflow_count()`](SampleFifo::overflow_count).

pub mod spsc;

pub use spsc::SampleFifo;
