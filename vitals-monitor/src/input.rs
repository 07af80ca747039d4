//! Analog knob inputs and their mapping onto control parameters.
//!
//! Both knobs are read through a 12-bit ADC (`0..=4095`). The maps are
//! linear and increase with the raw value:
//!
//! | Raw | Amplitude factor | Generation interval |
//! |-----|------------------|---------------------|
//! | 0 | 0.10 | 9 ms (fastest) |
//! | 4095 | 1.00 | 48 ms (slowest) |
//!
//! Integer arithmetic truncates toward zero, so the amplitude moves in 0.01
//! steps and the interval in whole milliseconds.

use crate::constants::{
    AMPLITUDE_PERCENT_MAX, AMPLITUDE_PERCENT_MIN, ANALOG_MAX, INTERVAL_MAX_MS, INTERVAL_MIN_MS,
};

/// A single analog channel.
///
/// Implementations wrap the platform ADC. Reads must not block for longer
/// than one conversion.
pub trait AnalogInput {
    /// Raw conversion result. Values above [`ANALOG_MAX`] are clamped by
    /// the mapping functions.
    fn read_raw(&mut self) -> u16;
}

impl<F: FnMut() -> u16> AnalogInput for F {
    fn read_raw(&mut self) -> u16 {
        self()
    }
}

/// Linearly re-map `x` from `in_min..=in_max` onto `out_min..=out_max`.
///
/// Same arithmetic as the Arduino `map()`: no clamping, integer division
/// truncating toward zero. `in_min` must differ from `in_max`.
pub const fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

const fn clamp_raw(raw: u16) -> i32 {
    if raw > ANALOG_MAX {
        ANALOG_MAX as i32
    } else {
        raw as i32
    }
}

/// Amplitude factor for a raw knob reading, in `[0.1, 1.0]`.
pub fn amplitude_from_raw(raw: u16) -> f32 {
    let percent = map_range(
        clamp_raw(raw),
        0,
        ANALOG_MAX as i32,
        AMPLITUDE_PERCENT_MIN,
        AMPLITUDE_PERCENT_MAX,
    );
    percent as f32 / 100.0
}

/// Generation interval for a raw knob reading, in `[9, 48]` ms.
pub const fn interval_from_raw(raw: u16) -> u32 {
    map_range(
        clamp_raw(raw),
        0,
        ANALOG_MAX as i32,
        INTERVAL_MIN_MS as i32,
        INTERVAL_MAX_MS as i32,
    ) as u32
}

/// The amplitude and rate knobs.
pub struct Knobs<A, R> {
    pub amplitude: A,
    pub rate: R,
}

impl<A: AnalogInput, R: AnalogInput> Knobs<A, R> {
    pub fn new(amplitude: A, rate: R) -> Self {
        Knobs { amplitude, rate }
    }

    /// Read both knobs and map them: `(amplitude_factor, interval_ms)`.
    pub fn read(&mut self) -> (f32, u32) {
        let amplitude = amplitude_from_raw(self.amplitude.read_raw());
        let interval = interval_from_raw(self.rate.read_raw());
        (amplitude, interval)
    }
}
