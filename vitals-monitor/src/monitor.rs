//! Process-lifetime wiring of the FIFO and control state.
//!
//! [`Monitor`] is `const`-constructible so firmware can keep it in a
//! `static`. It hands out exactly one [`SignalGenerator`] (for the timer
//! ISR) and one [`Dispatcher`] (for the main loop), which is what makes the
//! FIFO's single-producer single-consumer contract hold.
//!
//! ```ignore
//! static MONITOR: Monitor<FIFO_CAPACITY> = Monitor::new();
//!
//! let mut generator = MONITOR.take_generator().unwrap();
//! let mut dispatcher = MONITOR.take_dispatcher(knobs, sink).unwrap();
//! let mut mode_button = DebouncedToggle::new(ToggleTarget::EkgMode);
//! let mut kill_button = DebouncedToggle::new(ToggleTarget::Alive);
//!
//! // Timer ISR (1 ms):   generator.on_tick();
//! // Main loop:
//! loop {
//!     let now = millis();
//!     dispatcher.poll(now);
//!     mode_button.poll(&mut mode_pin, now, MONITOR.control())?;
//!     kill_button.poll(&mut kill_pin, now, MONITOR.control())?;
//! }
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use crate::control::ControlState;
use crate::dispatch::Dispatcher;
use crate::fifo::SampleFifo;
use crate::generator::SignalGenerator;
use crate::input::{AnalogInput, Knobs};
use crate::link::EventSink;

/// Shared state of one simulated patient monitor.
pub struct Monitor<const N: usize> {
    fifo: SampleFifo<N>,
    control: ControlState,
    producer_taken: AtomicBool,
    consumer_taken: AtomicBool,
}

impl<const N: usize> Monitor<N> {
    pub const fn new() -> Self {
        Monitor {
            fifo: SampleFifo::new(),
            control: ControlState::new(),
            producer_taken: AtomicBool::new(false),
            consumer_taken: AtomicBool::new(false),
        }
    }

    /// The producer half. Returns `None` after the first call.
    pub fn take_generator(&self) -> Option<SignalGenerator<'_, N>> {
        if self.producer_taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(SignalGenerator::new(&self.control, &self.fifo))
    }

    /// The consumer half. Returns `None` after the first call.
    pub fn take_dispatcher<A, R, S>(
        &self,
        knobs: Knobs<A, R>,
        sink: S,
    ) -> Option<Dispatcher<'_, N, A, R, S>>
    where
        A: AnalogInput,
        R: AnalogInput,
        S: EventSink,
    {
        if self.consumer_taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Dispatcher::new(&self.fifo, &self.control, knobs, sink))
    }

    /// Control state, for the button toggles and for status readouts.
    pub fn control(&self) -> &ControlState {
        &self.control
    }

    /// Samples currently buffered.
    pub fn backlog(&self) -> usize {
        self.fifo.len()
    }

    /// Samples dropped because the FIFO was full.
    pub fn dropped(&self) -> u32 {
        self.fifo.overflow_count()
    }
}

impl<const N: usize> Default for Monitor<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSink;

    impl EventSink for NullSink {
        fn publish(&mut self, _event: &str, _value: u8, _timestamp_ms: u32) {}
    }

    #[test]
    fn halves_are_handed_out_once() {
        let monitor: Monitor<8> = Monitor::new();
        assert!(monitor.take_generator().is_some());
        assert!(monitor.take_generator().is_none());

        let knobs = Knobs::new(|| 0u16, || 0u16);
        assert!(monitor.take_dispatcher(knobs, NullSink).is_some());
        let knobs = Knobs::new(|| 0u16, || 0u16);
        assert!(monitor.take_dispatcher(knobs, NullSink).is_none());
    }

    #[test]
    fn static_monitor() {
        static MONITOR: Monitor<16> = Monitor::new();
        let mut generator = MONITOR.take_generator().unwrap();
        for _ in 0..9 * 3 {
            generator.tick();
        }
        assert_eq!(MONITOR.backlog(), 3);
        assert_eq!(MONITOR.dropped(), 0);
        assert!(MONITOR.control().alive());
    }
}
