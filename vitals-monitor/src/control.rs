//! Mode and parameter state shared between the timer ISR and the main loop.
//!
//! Every field lives in its own atomic, so a read from the interrupt context
//! never observes a half-written value and neither side ever locks. Fields
//! are independent: there is no cross-field consistency, and readers may
//! see a value one update stale. All accesses use `Relaxed` ordering.
//!
//! Ownership of writes:
//!
//! | Field | Written by |
//! |-------|------------|
//! | `alive`, `ekg_mode` | debounced buttons |
//! | `amplitude_factor`, `generation_interval_ms` | dispatch loop (knobs) |

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::constants::{
    AMPLITUDE_PERCENT_MAX, AMPLITUDE_PERCENT_MIN, DEFAULT_AMPLITUDE, DEFAULT_INTERVAL_MS,
    INTERVAL_MAX_MS, INTERVAL_MIN_MS,
};
use crate::waveform::TableSelector;

const AMPLITUDE_MIN: f32 = AMPLITUDE_PERCENT_MIN as f32 / 100.0;
const AMPLITUDE_MAX: f32 = AMPLITUDE_PERCENT_MAX as f32 / 100.0;

/// Simulation mode flags plus amplitude and generation rate.
pub struct ControlState {
    alive: AtomicBool,
    ekg_mode: AtomicBool,
    /// `f32` bit pattern.
    amplitude: AtomicU32,
    interval_ms: AtomicU32,
}

/// Plain copy of the control state at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlSnapshot {
    pub alive: bool,
    pub ekg_mode: bool,
    pub amplitude_factor: f32,
    pub generation_interval_ms: u32,
}

impl ControlState {
    /// Alive, EKG mode, full amplitude, fastest generation rate.
    pub const fn new() -> Self {
        ControlState {
            alive: AtomicBool::new(true),
            ekg_mode: AtomicBool::new(true),
            amplitude: AtomicU32::new(DEFAULT_AMPLITUDE.to_bits()),
            interval_ms: AtomicU32::new(DEFAULT_INTERVAL_MS),
        }
    }

    pub fn alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::Relaxed);
    }

    pub fn ekg_mode(&self) -> bool {
        self.ekg_mode.load(Ordering::Relaxed)
    }

    pub fn set_ekg_mode(&self, ekg_mode: bool) {
        self.ekg_mode.store(ekg_mode, Ordering::Relaxed);
    }

    /// Flip `alive`. Returns the new value.
    ///
    /// Load/store rather than `fetch_xor`: each flag has a single writer.
    pub fn toggle_alive(&self) -> bool {
        let alive = !self.alive();
        self.set_alive(alive);
        alive
    }

    /// Flip `ekg_mode`. Returns the new value.
    pub fn toggle_ekg_mode(&self) -> bool {
        let ekg_mode = !self.ekg_mode();
        self.set_ekg_mode(ekg_mode);
        ekg_mode
    }

    /// Amplitude factor in `[0.1, 1.0]`.
    pub fn amplitude_factor(&self) -> f32 {
        f32::from_bits(self.amplitude.load(Ordering::Relaxed))
    }

    /// Set the amplitude factor, clamped to `[0.1, 1.0]`.
    ///
    /// NaN is ignored.
    pub fn set_amplitude_factor(&self, factor: f32) {
        if factor.is_nan() {
            return;
        }
        let clamped = if factor > AMPLITUDE_MAX {
            AMPLITUDE_MAX
        } else if factor < AMPLITUDE_MIN {
            AMPLITUDE_MIN
        } else {
            factor
        };
        self.amplitude.store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Ticks between generated samples, in `[9, 48]`.
    pub fn generation_interval_ms(&self) -> u32 {
        self.interval_ms.load(Ordering::Relaxed)
    }

    /// Set the generation interval, clamped to `[9, 48]`.
    pub fn set_generation_interval_ms(&self, interval_ms: u32) {
        let clamped = interval_ms.clamp(INTERVAL_MIN_MS, INTERVAL_MAX_MS);
        self.interval_ms.store(clamped, Ordering::Relaxed);
    }

    /// Table the generator should draw from right now.
    pub fn selector(&self) -> TableSelector {
        TableSelector::from_flags(self.alive(), self.ekg_mode())
    }

    /// Read every field. Fields are loaded one by one, not as a unit.
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            alive: self.alive(),
            ekg_mode: self.ekg_mode(),
            amplitude_factor: self.amplitude_factor(),
            generation_interval_ms: self.generation_interval_ms(),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}
