//! Button debouncing and the mode toggles built on it.
//!
//! [`Debouncer`] is a per-button state machine:
//!
//! ```text
//!            raw differs from last raw: restart window
//!   Released ───────────────────────────────► Transitioning
//!      ▲                                         │
//!      │ window > delay, raw == released         │ window > delay, raw == pressed
//!      └──────────── Transitioning ◄── Pressed ◄─┘   (press committed: fire once)
//! ```
//!
//! A reading must stay unchanged for longer than the debounce delay before it
//! becomes the stable state. Only the commit of the pressed level fires;
//! releases and holds do not.
//!
//! [`DebouncedToggle`] pairs one debouncer with the [`ControlState`] flag it
//! flips. The reference hardware has two: EKG/ARY mode and alive/dead.

use crate::constants::DEBOUNCE_DELAY_MS;
use crate::control::ControlState;

/// Logic level of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    /// `true` is [`Level::High`].
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Level a button reads while it is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Button to ground with a pull-up (reference wiring).
    Low,
    /// Button to supply with a pull-down.
    High,
}

impl ActiveLevel {
    const fn pressed(self) -> Level {
        match self {
            ActiveLevel::Low => Level::Low,
            ActiveLevel::High => Level::High,
        }
    }

    const fn released(self) -> Level {
        match self {
            ActiveLevel::Low => Level::High,
            ActiveLevel::High => Level::Low,
        }
    }
}

/// Observable state of a [`Debouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Released,
    Pressed,
    /// The last raw reading differs from the stable state.
    Transitioning,
}

/// Debounce state machine for one button.
pub struct Debouncer {
    active: ActiveLevel,
    delay_ms: u32,
    /// Last committed level.
    stable: Level,
    /// Level seen by the previous `update()`.
    last_raw: Level,
    /// Time `last_raw` last changed.
    last_change_ms: u32,
}

impl Debouncer {
    /// Debouncer with the default 50 ms window, starting released.
    pub const fn new(active: ActiveLevel) -> Self {
        Self::with_delay(active, DEBOUNCE_DELAY_MS)
    }

    /// Debouncer with a custom window, starting released.
    pub const fn with_delay(active: ActiveLevel, delay_ms: u32) -> Self {
        Debouncer {
            active,
            delay_ms,
            stable: active.released(),
            last_raw: active.released(),
            last_change_ms: 0,
        }
    }

    /// Feed one raw reading taken at `now_ms`.
    ///
    /// Returns `true` exactly once per committed press. `now_ms` is a free
    /// running millisecond counter; wrap-around is handled.
    pub fn update(&mut self, raw: Level, now_ms: u32) -> bool {
        if raw != self.last_raw {
            self.last_change_ms = now_ms;
        }
        self.last_raw = raw;

        let settled = now_ms.wrapping_sub(self.last_change_ms) > self.delay_ms;
        if settled && raw != self.stable {
            self.stable = raw;
            return raw == self.active.pressed();
        }
        false
    }

    pub fn state(&self) -> ButtonState {
        if self.last_raw != self.stable {
            ButtonState::Transitioning
        } else if self.stable == self.active.pressed() {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }

    /// `true` once a press has been committed and until its release is.
    pub fn is_pressed(&self) -> bool {
        self.stable == self.active.pressed()
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

/// Flag a [`DebouncedToggle`] flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleTarget {
    /// Alive / dead (flatline).
    Alive,
    /// EKG / ARY rhythm.
    EkgMode,
}

impl ToggleTarget {
    /// Flip the flag. Returns its new value.
    pub fn apply(self, control: &ControlState) -> bool {
        match self {
            ToggleTarget::Alive => control.toggle_alive(),
            ToggleTarget::EkgMode => control.toggle_ekg_mode(),
        }
    }
}

/// A debounced button that flips one control flag per press.
pub struct DebouncedToggle {
    debouncer: Debouncer,
    target: ToggleTarget,
}

impl DebouncedToggle {
    /// Active-low button with the default debounce window.
    pub const fn new(target: ToggleTarget) -> Self {
        Self::with_debouncer(target, Debouncer::new(ActiveLevel::Low))
    }

    pub const fn with_debouncer(target: ToggleTarget, debouncer: Debouncer) -> Self {
        DebouncedToggle { debouncer, target }
    }

    /// Feed one raw reading. Returns `true` if the flag was flipped.
    pub fn update(&mut self, raw: Level, now_ms: u32, control: &ControlState) -> bool {
        if self.debouncer.update(raw, now_ms) {
            self.target.apply(control);
            true
        } else {
            false
        }
    }

    /// Read `pin` and feed the level. Returns `true` if the flag was flipped.
    #[cfg(feature = "hal")]
    pub fn poll<P: embedded_hal::digital::InputPin>(
        &mut self,
        pin: &mut P,
        now_ms: u32,
        control: &ControlState,
    ) -> Result<bool, P::Error> {
        let level = Level::from(pin.is_high()?);
        Ok(self.update(level, now_ms, control))
    }

    pub fn target(&self) -> ToggleTarget {
        self.target
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `level` every millisecond from `from` (inclusive) to `to` (exclusive).
    /// Returns how many presses fired.
    fn hold(d: &mut Debouncer, level: Level, from: u32, to: u32) -> usize {
        (from..to).filter(|&t| d.update(level, t)).count()
    }

    #[test]
    fn starts_released() {
        let d = Debouncer::new(ActiveLevel::Low);
        assert_eq!(d.state(), ButtonState::Released);
        assert!(!d.is_pressed());
        assert_eq!(d.delay_ms(), 50);
    }

    #[test]
    fn stable_press_fires_once() {
        let mut d = Debouncer::new(ActiveLevel::Low);
        assert_eq!(hold(&mut d, Level::High, 0, 100), 0);

        // Held for 200 ms: exactly one press
        assert_eq!(hold(&mut d, Level::Low, 100, 300), 1);
        assert_eq!(d.state(), ButtonState::Pressed);

        // Release fires nothing
        assert_eq!(hold(&mut d, Level::High, 300, 500), 0);
        assert_eq!(d.state(), ButtonState::Released);

        // Second press fires again
        assert_eq!(hold(&mut d, Level::Low, 500, 700), 1);
    }

    #[test]
    fn commit_needs_more_than_delay() {
        let mut d = Debouncer::new(ActiveLevel::Low);
        assert!(!d.update(Level::Low, 1000));
        assert_eq!(d.state(), ButtonState::Transitioning);
        // Exactly 50 ms is not enough
        assert!(!d.update(Level::Low, 1050));
        assert!(d.update(Level::Low, 1051));
        assert!(!d.update(Level::Low, 1052));
    }

    #[test]
    fn bounces_never_fire() {
        let mut d = Debouncer::new(ActiveLevel::Low);
        hold(&mut d, Level::High, 0, 100);

        // Contact bounce: level flips every 10 ms for a long time
        let mut fired = 0;
        for t in 100..2_000u32 {
            let level = if (t / 10) % 2 == 0 { Level::Low } else { Level::High };
            if d.update(level, t) {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);
        assert!(!d.is_pressed());
    }

    #[test]
    fn bouncy_press_fires_once_after_settling() {
        let mut d = Debouncer::new(ActiveLevel::Low);
        hold(&mut d, Level::High, 0, 100);

        let pattern = [Level::Low, Level::High, Level::Low, Level::High, Level::Low];
        let mut fired = 0;
        for (i, &level) in pattern.iter().enumerate() {
            if d.update(level, 100 + i as u32 * 5) {
                fired += 1;
            }
        }
        fired += hold(&mut d, Level::Low, 125, 400);
        assert_eq!(fired, 1);
    }

    #[test]
    fn active_high_button() {
        let mut d = Debouncer::with_delay(ActiveLevel::High, 10);
        assert_eq!(hold(&mut d, Level::Low, 0, 50), 0);
        assert_eq!(hold(&mut d, Level::High, 50, 100), 1);
        assert_eq!(hold(&mut d, Level::Low, 100, 150), 0);
    }

    #[test]
    fn millis_wraparound() {
        let mut d = Debouncer::new(ActiveLevel::Low);
        let start = u32::MAX - 20;
        assert!(!d.update(Level::Low, start));
        assert!(!d.update(Level::Low, start.wrapping_add(40)));
        assert!(d.update(Level::Low, start.wrapping_add(60)));
    }

    #[test]
    fn toggles_are_independent() {
        let control = ControlState::new();
        let mut mode = DebouncedToggle::new(ToggleTarget::EkgMode);
        let mut kill = DebouncedToggle::new(ToggleTarget::Alive);

        for t in 0..200u32 {
            mode.update(Level::High, t, &control);
            kill.update(Level::High, t, &control);
        }

        // Press only the mode button
        let mut flips = 0;
        for t in 200..400u32 {
            if mode.update(Level::Low, t, &control) {
                flips += 1;
            }
            assert!(!kill.update(Level::High, t, &control));
        }
        assert_eq!(flips, 1);
        assert!(!control.ekg_mode());
        assert!(control.alive());

        // Now the kill button, while mode is still held
        for t in 400..600u32 {
            assert!(!mode.update(Level::Low, t, &control));
            kill.update(Level::Low, t, &control);
        }
        assert!(!control.alive());
        assert!(!control.ekg_mode());
        assert_eq!(kill.target(), ToggleTarget::Alive);
    }

    #[cfg(feature = "hal")]
    mod hal {
        use super::*;
        use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin};

        #[derive(Debug, PartialEq)]
        struct PinFault;

        impl digital::Error for PinFault {
            fn kind(&self) -> ErrorKind {
                ErrorKind::Other
            }
        }

        /// Pin whose level is set by the test; can be told to fail.
        struct MockPin {
            high: bool,
            faulty: bool,
        }

        impl ErrorType for MockPin {
            type Error = PinFault;
        }

        impl InputPin for MockPin {
            fn is_high(&mut self) -> Result<bool, PinFault> {
                if self.faulty {
                    Err(PinFault)
                } else {
                    Ok(self.high)
                }
            }

            fn is_low(&mut self) -> Result<bool, PinFault> {
                self.is_high().map(|high| !high)
            }
        }

        #[test]
        fn poll_reads_pin() {
            let control = ControlState::new();
            let mut toggle = DebouncedToggle::new(ToggleTarget::Alive);
            let mut pin = MockPin {
                high: true,
                faulty: false,
            };

            for t in 0..100u32 {
                assert_eq!(toggle.poll(&mut pin, t, &control), Ok(false));
            }

            pin.high = false;
            let flips = (100..300u32)
                .filter(|&t| toggle.poll(&mut pin, t, &control) == Ok(true))
                .count();
            assert_eq!(flips, 1);
            assert!(!control.alive());
        }

        #[test]
        fn poll_propagates_pin_error() {
            let control = ControlState::new();
            let mut toggle = DebouncedToggle::new(ToggleTarget::EkgMode);
            let mut pin = MockPin {
                high: false,
                faulty: true,
            };
            assert_eq!(toggle.poll(&mut pin, 0, &control), Err(PinFault));
            assert!(control.ekg_mode());
            assert_eq!(toggle.debouncer().state(), ButtonState::Released);
        }
    }
}
