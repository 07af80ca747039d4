//! Main-loop consumer: knobs in, scaled samples out.
//!
//! [`Dispatcher::poll()`] is called once per main-loop iteration. It never
//! waits: the knobs are read and stored, then at most one sample is taken
//! from the FIFO and published. Draining one sample per iteration ties the
//! outbound event rate to the loop rate; when the loop or the push channel
//! is slower than the generator the FIFO fills and the generator drops.

use crate::constants::VALUE_EVENT;
use crate::control::ControlState;
use crate::fifo::SampleFifo;
use crate::input::{AnalogInput, Knobs};
use crate::link::EventSink;
use crate::waveform::Sample;

/// Apply the amplitude factor to a sample, truncating toward zero.
#[inline]
pub fn scale_sample(sample: Sample, amplitude_factor: f32) -> u8 {
    (sample as f32 * amplitude_factor) as u8
}

/// Consumer half of the monitor.
///
/// Holds the only dequeue path out of the FIFO and the only writer of the
/// amplitude and interval fields of [`ControlState`].
pub struct Dispatcher<'a, const N: usize, A, R, S> {
    fifo: &'a SampleFifo<N>,
    control: &'a ControlState,
    knobs: Knobs<A, R>,
    sink: S,
}

impl<'a, const N: usize, A, R, S> Dispatcher<'a, N, A, R, S>
where
    A: AnalogInput,
    R: AnalogInput,
    S: EventSink,
{
    pub fn new(
        fifo: &'a SampleFifo<N>,
        control: &'a ControlState,
        knobs: Knobs<A, R>,
        sink: S,
    ) -> Self {
        Dispatcher {
            fifo,
            control,
            knobs,
            sink,
        }
    }

    /// Refresh amplitude and interval from the knobs (last write wins).
    pub fn read_controls(&mut self) {
        let (amplitude, interval_ms) = self.knobs.read();
        self.control.set_amplitude_factor(amplitude);
        self.control.set_generation_interval_ms(interval_ms);
    }

    /// Forward at most one queued sample. Returns the published value.
    pub fn forward_one(&mut self, now_ms: u32) -> Option<u8> {
        let sample = self.fifo.dequeue()?;
        let value = scale_sample(sample, self.control.amplitude_factor());
        self.sink.publish(VALUE_EVENT, value, now_ms);
        Some(value)
    }

    /// One main-loop iteration: [`read_controls`](Self::read_controls) then
    /// [`forward_one`](Self::forward_one).
    pub fn poll(&mut self, now_ms: u32) -> Option<u8> {
        self.read_controls();
        self.forward_one(now_ms)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn knobs_mut(&mut self) -> &mut Knobs<A, R> {
        &mut self.knobs
    }
}
