//! Timer-driven waveform producer.
//!
//! The hardware timer fires at a fixed 1 ms. [`SignalGenerator`] divides that
//! down by the generation interval from [`ControlState`], so the waveform
//! speed follows the rate knob without reprogramming the timer.
//!
//! ## Usage
//!
//! ```ignore
//! static MONITOR: Monitor<FIFO_CAPACITY> = Monitor::new();
//!
//! // Timer ISR, every 1 ms:
//! generator.on_tick();
//! ```

use crate::control::ControlState;
use crate::fifo::SampleFifo;
use crate::tick::TickHandler;
use crate::waveform::{Sample, WaveformSource};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Not a generation tick.
    Idle,
    /// A sample was generated and queued.
    Queued(Sample),
    /// A sample was generated but the FIFO was full.
    Dropped(Sample),
}

/// Producer half of the monitor: waveform source plus tick divider.
///
/// Holds the only enqueue path into the FIFO.
pub struct SignalGenerator<'a, const N: usize> {
    source: WaveformSource,
    control: &'a ControlState,
    fifo: &'a SampleFifo<N>,
    /// Ticks since the last generated sample.
    ticks: u32,
}

impl<'a, const N: usize> SignalGenerator<'a, N> {
    /// Generator over the reference waveforms.
    pub const fn new(control: &'a ControlState, fifo: &'a SampleFifo<N>) -> Self {
        Self::with_source(WaveformSource::new(), control, fifo)
    }

    pub const fn with_source(
        source: WaveformSource,
        control: &'a ControlState,
        fifo: &'a SampleFifo<N>,
    ) -> Self {
        SignalGenerator {
            source,
            control,
            fifo,
            ticks: 0,
        }
    }

    /// Advance one timer tick.
    ///
    /// Every `generation_interval_ms` ticks, draws the next sample from the
    /// table the current mode selects and enqueues it. A full FIFO drops the
    /// sample; nothing is retried.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        if self.ticks < self.control.generation_interval_ms() {
            return TickOutcome::Idle;
        }
        self.ticks = 0;

        let sample = self.source.next_sample(self.control.selector());
        if self.fifo.enqueue(sample) {
            TickOutcome::Queued(sample)
        } else {
            TickOutcome::Dropped(sample)
        }
    }

    pub fn source(&self) -> &WaveformSource {
        &self.source
    }
}

impl<const N: usize> TickHandler for SignalGenerator<'_, N> {
    fn on_tick(&mut self) {
        // Overflow is an accepted loss.
        let _ = self.tick();
    }
}
