//! # vitals-monitor
//!
//! A `no_std`, allocation-free patient vital-sign simulator for
//! microcontrollers. A hardware timer generates an EKG, arrhythmia or
//! flatline waveform; the main loop scales each sample by the amplitude knob
//! and pushes it to connected dashboard clients.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Data | [`waveform`] | Compiled-in beat tables and the shared cursor |
//! | Transport | [`fifo`] | Lock-free SPSC sample FIFO between ISR and main loop |
//! | State | [`control`] | Atomic mode flags, amplitude and generation interval |
//! | Producer | [`generator`] / [`tick`] | Timer-tick divider feeding the FIFO |
//! | Consumer | [`dispatch`] / [`input`] | Knob reads, drain-one, scale, publish |
//! | Buttons | [`debounce`] | Debounced mode and alive/dead toggles |
//! | Boundary | [`link`] | Settings, network and push-channel traits; startup bring-up |
//! | Wiring | [`monitor`] | `static`-friendly owner handing out both halves |
//!
//! ## Data flow
//!
//! ```text
//!  knobs ──► Dispatcher ──► ControlState ◄── DebouncedToggle ◄── buttons
//!                │               │
//!                │               ▼
//!  timer ──► SignalGenerator ──► SampleFifo ──► Dispatcher ──► EventSink
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use vitals_monitor::constants::FIFO_CAPACITY;
//! use vitals_monitor::input::Knobs;
//! use vitals_monitor::monitor::Monitor;
//! use vitals_monitor::tick::TickHandler;
//!
//! static MONITOR: Monitor<FIFO_CAPACITY> = Monitor::new();
//!
//! let mut generator = MONITOR.take_generator().unwrap();
//! let mut dispatcher = MONITOR
//!     .take_dispatcher(Knobs::new(amp_adc, rate_adc), event_stream)
//!     .unwrap();
//!
//! // In the 1 ms timer ISR:
//! generator.on_tick();
//!
//! // In the main loop:
//! dispatcher.poll(millis());
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `hal` | yes | `DebouncedToggle::poll` over `embedded_hal::digital::InputPin` |
//! | `defmt` | no | Startup logging and `defmt::Format` on public enums |
//!
//! ## Parameters
//!
//! - **Tick:** 1 ms ([`constants::TICK_PERIOD_MS`])
//! - **FIFO:** 512 samples ([`constants::FIFO_CAPACITY`])
//! - **Generation interval:** 9–48 ticks
//! - **Amplitude:** 0.1–1.0
//! - **Debounce window:** 50 ms ([`constants::DEBOUNCE_DELAY_MS`])

#![no_std]

pub mod constants;
pub mod waveform;
pub mod fifo;
pub mod control;
pub mod tick;
pub mod generator;
pub mod input;
pub mod dispatch;
pub mod debounce;
pub mod link;
pub mod monitor;
