//! Waveform tables and the cursor that walks them.
//!
//! Three compiled-in tables describe one heartbeat each: a normal EKG
//! rhythm, an arrhythmia (ARY) rhythm and a flatline. [`WaveformSource`]
//! steps through whichever table the current mode selects, keeping a single
//! cursor so that switching modes mid-beat continues at the same position.

/// One waveform data point.
pub type Sample = u8;

/// Normal sinus rhythm, one beat.
pub const EKG: [Sample; 32] = [
    65, 65, 65, 65, 70, 76, 74, 70, 65, 63, 65, 65, 65, 65, 48, 230, 40, 65, 65, 65, 74, 90, 100,
    102, 100, 95, 80, 70, 65, 65, 65, 65,
];

/// Arrhythmia rhythm, one beat.
pub const ARY: [Sample; 32] = [
    65, 70, 67, 61, 70, 72, 74, 76, 70, 68, 67, 65, 63, 55, 48, 10, 15, 65, 67, 70, 74, 80, 100,
    102, 100, 95, 80, 70, 65, 65, 65, 65,
];

/// Flatline at the EKG baseline.
pub const FLATLINE: [Sample; 32] = [65; 32];

/// Which table the next sample is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableSelector {
    /// Normal rhythm (EKG mode).
    RhythmA,
    /// Arrhythmia rhythm (ARY mode).
    RhythmB,
    /// Patient is dead.
    Flatline,
}

impl TableSelector {
    /// Resolve the selector from the mode flags.
    ///
    /// `alive == false` always selects the flatline, whatever `ekg_mode` is.
    pub const fn from_flags(alive: bool, ekg_mode: bool) -> Self {
        match (alive, ekg_mode) {
            (false, _) => TableSelector::Flatline,
            (true, true) => TableSelector::RhythmA,
            (true, false) => TableSelector::RhythmB,
        }
    }
}

/// The three tables a [`WaveformSource`] chooses from.
///
/// Tables may differ in length but none may be empty.
#[derive(Debug, Clone, Copy)]
pub struct WaveformSet {
    pub rhythm_a: &'static [Sample],
    pub rhythm_b: &'static [Sample],
    pub flatline: &'static [Sample],
}

impl WaveformSet {
    /// Reference EKG / ARY / flatline data.
    pub const REFERENCE: WaveformSet = WaveformSet {
        rhythm_a: &EKG,
        rhythm_b: &ARY,
        flatline: &FLATLINE,
    };

    /// Build a set from custom tables.
    ///
    /// Returns `None` if any table is empty.
    pub const fn new(
        rhythm_a: &'static [Sample],
        rhythm_b: &'static [Sample],
        flatline: &'static [Sample],
    ) -> Option<Self> {
        if rhythm_a.is_empty() || rhythm_b.is_empty() || flatline.is_empty() {
            return None;
        }
        Some(WaveformSet {
            rhythm_a,
            rhythm_b,
            flatline,
        })
    }

    /// Table for a selector.
    pub const fn table(&self, selector: TableSelector) -> &'static [Sample] {
        match selector {
            TableSelector::RhythmA => self.rhythm_a,
            TableSelector::RhythmB => self.rhythm_b,
            TableSelector::Flatline => self.flatline,
        }
    }
}

/// Steps through the selected table one sample per call.
pub struct WaveformSource {
    tables: WaveformSet,
    /// Position of the next sample, shared by all tables.
    cursor: usize,
}

impl WaveformSource {
    /// Source over the reference tables, starting at the first sample.
    pub const fn new() -> Self {
        Self::with_tables(WaveformSet::REFERENCE)
    }

    /// Source over a custom table set.
    pub const fn with_tables(tables: WaveformSet) -> Self {
        WaveformSource { tables, cursor: 0 }
    }

    /// Return the sample at the cursor in the selected table and advance.
    ///
    /// The cursor is reduced modulo the selected table's length, so tables
    /// of different lengths can be switched between freely.
    pub fn next_sample(&mut self, selector: TableSelector) -> Sample {
        let table = self.tables.table(selector);
        let index = self.cursor % table.len();
        self.cursor = (index + 1) % table.len();
        table[index]
    }

    /// Position the next call will read from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Restart at the first sample.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn tables(&self) -> &WaveformSet {
        &self.tables
    }
}

impl Default for WaveformSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SHORT: [Sample; 5] = [1, 2, 3, 4, 5];
    static LONG: [Sample; 7] = [10, 20, 30, 40, 50, 60, 70];
    static FLAT3: [Sample; 3] = [0, 0, 0];

    #[test]
    fn selector_from_flags() {
        assert_eq!(TableSelector::from_flags(true, true), TableSelector::RhythmA);
        assert_eq!(TableSelector::from_flags(true, false), TableSelector::RhythmB);
        assert_eq!(TableSelector::from_flags(false, true), TableSelector::Flatline);
        assert_eq!(TableSelector::from_flags(false, false), TableSelector::Flatline);
    }

    #[test]
    fn full_table_then_wrap() {
        let mut src = WaveformSource::new();
        for &expected in EKG.iter() {
            assert_eq!(src.next_sample(TableSelector::RhythmA), expected);
        }
        // Call L+1 starts over
        assert_eq!(src.next_sample(TableSelector::RhythmA), EKG[0]);
        assert_eq!(src.next_sample(TableSelector::RhythmA), EKG[1]);
    }

    #[test]
    fn wrap_for_any_length() {
        let set = WaveformSet::new(&SHORT, &LONG, &FLAT3).unwrap();
        let mut src = WaveformSource::with_tables(set);
        for _ in 0..3 {
            for &expected in LONG.iter() {
                assert_eq!(src.next_sample(TableSelector::RhythmB), expected);
            }
        }
        assert_eq!(src.cursor(), 0);
    }

    #[test]
    fn mode_switch_keeps_cursor() {
        let mut src = WaveformSource::new();
        for _ in 0..5 {
            src.next_sample(TableSelector::RhythmA);
        }
        assert_eq!(src.cursor(), 5);

        // Switching tables continues at the same position
        assert_eq!(src.next_sample(TableSelector::RhythmB), ARY[5]);
        assert_eq!(src.next_sample(TableSelector::Flatline), FLATLINE[6]);
        assert_eq!(src.next_sample(TableSelector::RhythmA), EKG[7]);
        assert_eq!(src.cursor(), 8);
    }

    #[test]
    fn switch_to_shorter_table_wraps_cursor() {
        let set = WaveformSet::new(&SHORT, &LONG, &FLAT3).unwrap();
        let mut src = WaveformSource::with_tables(set);
        for _ in 0..6 {
            src.next_sample(TableSelector::RhythmB);
        }
        assert_eq!(src.cursor(), 6);

        // 6 % 5 == 1
        assert_eq!(src.next_sample(TableSelector::RhythmA), SHORT[1]);
        assert_eq!(src.cursor(), 2);
    }

    #[test]
    fn dead_always_flatline() {
        let mut src = WaveformSource::new();
        for i in 0..100 {
            let selector = TableSelector::from_flags(false, i % 2 == 0);
            assert_eq!(src.next_sample(selector), 65);
        }
    }

    #[test]
    fn empty_table_rejected() {
        static EMPTY: [Sample; 0] = [];
        assert!(WaveformSet::new(&EMPTY, &LONG, &FLAT3).is_none());
        assert!(WaveformSet::new(&SHORT, &EMPTY, &FLAT3).is_none());
        assert!(WaveformSet::new(&SHORT, &LONG, &EMPTY).is_none());
    }

    #[test]
    fn reset_restarts() {
        let mut src = WaveformSource::new();
        src.next_sample(TableSelector::RhythmB);
        src.next_sample(TableSelector::RhythmB);
        src.reset();
        assert_eq!(src.next_sample(TableSelector::RhythmB), ARY[0]);
    }
}
