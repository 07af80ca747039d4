/// Period of the hardware timer that drives the signal generator, in ms.
pub const TICK_PERIOD_MS: u32 = 1;

/// Number of samples the FIFO between the timer ISR and the main loop holds.
///
/// At the fastest generation interval (9 ticks) this covers roughly 4.6 s
/// of main-loop stall before the generator starts dropping samples.
pub const FIFO_CAPACITY: usize = 512;

/// Stabilization window for button reads, in ms.
pub const DEBOUNCE_DELAY_MS: u32 = 50;

/// Largest raw value the 12-bit ADC reports.
pub const ANALOG_MAX: u16 = 4095;

/// Amplitude range in percent (mapped from the amplitude knob).
pub const AMPLITUDE_PERCENT_MIN: i32 = 10;
pub const AMPLITUDE_PERCENT_MAX: i32 = 100;

/// Generation interval range in ticks (mapped from the rate knob).
pub const INTERVAL_MIN_MS: u32 = 9;
pub const INTERVAL_MAX_MS: u32 = 48;

/// Amplitude factor before the first knob read.
pub const DEFAULT_AMPLITUDE: f32 = 1.0;

/// Generation interval before the first knob read.
pub const DEFAULT_INTERVAL_MS: u32 = INTERVAL_MIN_MS;

/// Event name used when publishing samples to the push channel.
pub const VALUE_EVENT: &str = "value";

/// Subnet mask applied alongside the static IP at bring-up.
pub const SUBNET_MASK: [u8; 4] = [255, 255, 0, 0];
