//! Registry of buttons and the periodic scan over them.

use heapless::Vec;

use crate::button::{Button, ReadLevel};
use crate::event::Event;
use crate::log;

/// Handle of a registered button.
///
/// Assigned at registration, never reused, and stable for the
/// scanner's lifetime. Doubles as the button's bit position in the
/// level word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(u8);

impl ButtonId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Rejected registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// A button with the same code is already registered.
    AlreadyRegistered,
    /// Every bit of the level word is taken.
    CapacityExceeded,
}

/// Samples and classifies a group of buttons once per tick.
///
/// The scanner owns its buttons and one generation of level history,
/// so independent groups can run side by side. Call [`scan`] at a
/// stable cadence of 5 to 20 ms; that cadence defines the meaning of
/// every tick threshold.
///
/// [`scan`]: Scanner::scan
#[derive(Debug)]
pub struct Scanner<R, const N: usize = 32> {
    buttons: Vec<Button<R>, N>,
    previous: u32,
    fired: Vec<(ButtonId, Event), N>,
}

#[allow(clippy::new_without_default)]
impl<R: ReadLevel, const N: usize> Scanner<R, N> {
    /// Each button occupies one bit of the level word.
    const FITS_LEVEL_WORD: () = assert!(N <= 32, "the level word holds at most 32 buttons");

    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS_LEVEL_WORD;
        Self {
            buttons: Vec::new(),
            previous: 0,
            fired: Vec::new(),
        }
    }

    /// Adds a button to the scan set and assigns its bit position.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` when a button with the same code is in the
    /// set, `CapacityExceeded` when the set is full. A rejected
    /// registration leaves the set untouched.
    pub fn register(&mut self, button: Button<R>) -> Result<ButtonId, RegisterError> {
        if self.buttons.iter().any(|b| b.code() == button.code()) {
            return Err(RegisterError::AlreadyRegistered);
        }
        if self.buttons.is_full() {
            return Err(RegisterError::CapacityExceeded);
        }

        let id = ButtonId(self.buttons.len() as u8);
        log::info!("Registering button code={} at bit={}", button.code(), id.0);
        let _ = self.buttons.push(button);
        Ok(id)
    }

    /// One scan tick: samples every button, then advances every
    /// classification.
    ///
    /// Returns the events produced during this tick; the slice is
    /// valid until the next call. Levels are captured for all buttons
    /// before any classification runs, so the tick is atomic across
    /// the group.
    pub fn scan(&mut self) -> &[(ButtonId, Event)] {
        let levels = self.sample();
        let toggled = levels ^ self.previous;
        self.previous = levels;

        self.fired.clear();
        for (i, button) in self.buttons.iter_mut().enumerate() {
            if let Some(event) = button.step((toggled & (1 << i)) != 0) {
                // NOTE: The capacity fits one event per button and tick.
                let _ = self.fired.push((ButtonId(i as u8), event));
            }
        }
        &self.fired
    }

    /// The most recent classification of the given button.
    #[must_use]
    pub fn event(&self, id: ButtonId) -> Option<Event> {
        self.buttons.get(id.index()).and_then(Button::event)
    }

    #[must_use]
    pub fn button(&self, id: ButtonId) -> Option<&Button<R>> {
        self.buttons.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    fn sample(&mut self) -> u32 {
        let mut levels = 0;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            if button.is_pressed() {
                levels |= 1 << i;
            }
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use std::vec::Vec as StdVec;

    use proptest::prelude::*;

    use super::*;
    use crate::config::{Config, Level};

    struct Probe<'a>(&'a Cell<Level>);

    impl ReadLevel for Probe<'_> {
        fn read_level(&mut self) -> Level {
            self.0.get()
        }
    }

    const CONFIG: Config = Config {
        debounce_ticks: 0,
        click_start_ticks: 0,
        short_press_ticks: 10,
        long_press_ticks: 50,
        long_hold_ticks: 100,
        release_window_ticks: 15,
    };

    fn active_high<'a>(code: u8, line: &'a Cell<Level>) -> Button<Probe<'a>> {
        Button::new(code, Level::High, CONFIG, Probe(line))
    }

    fn scan_for<const N: usize>(scanner: &mut Scanner<Probe<'_>, N>, ticks: u32) {
        for _ in 0..ticks {
            scanner.scan();
        }
    }

    #[test]
    fn when_two_buttons_share_a_code_the_second_registration_is_rejected() {
        let line = Cell::new(Level::Low);
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();

        scanner.register(active_high(7, &line)).unwrap();
        assert_eq!(
            scanner.register(active_high(7, &line)),
            Err(RegisterError::AlreadyRegistered)
        );
        assert_eq!(scanner.len(), 1);
    }

    #[test]
    fn when_the_set_is_full_registration_is_rejected() {
        let line = Cell::new(Level::Low);
        let mut scanner: Scanner<Probe<'_>, 2> = Scanner::new();

        scanner.register(active_high(0, &line)).unwrap();
        scanner.register(active_high(1, &line)).unwrap();
        assert_eq!(
            scanner.register(active_high(2, &line)),
            Err(RegisterError::CapacityExceeded)
        );
        assert_eq!(scanner.len(), 2);
    }

    #[test]
    fn registered_buttons_get_consecutive_stable_ids() {
        let line = Cell::new(Level::Low);
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();

        let first = scanner.register(active_high(0, &line)).unwrap();
        let second = scanner.register(active_high(1, &line)).unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);
        assert_eq!(scanner.button(second).unwrap().code(), 1);
    }

    #[test]
    fn a_short_press_is_reported_through_the_scan_and_the_accessor() {
        let line = Cell::new(Level::Low);
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();
        let id = scanner.register(active_high(0, &line)).unwrap();

        line.set(Level::High);
        scanner.scan();
        scan_for(&mut scanner, 30);
        line.set(Level::Low);

        let fired = scanner.scan();
        assert_eq!(fired, &[(id, Event::ShortUp)]);
        assert_eq!(scanner.event(id), Some(Event::ShortUp));
    }

    #[test]
    fn a_long_press_is_reported_after_the_long_threshold() {
        let line = Cell::new(Level::Low);
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();
        let id = scanner.register(active_high(0, &line)).unwrap();

        line.set(Level::High);
        scanner.scan();
        scan_for(&mut scanner, 60);
        line.set(Level::Low);

        assert_eq!(scanner.scan(), &[(id, Event::LongUp)]);
    }

    #[test]
    fn when_wiring_is_inverted_the_classification_is_the_same() {
        let direct = Cell::new(Level::Low);
        let inverted = Cell::new(Level::High);
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();
        let a = scanner.register(active_high(0, &direct)).unwrap();
        let b = scanner
            .register(Button::new(1, Level::Low, CONFIG, Probe(&inverted)))
            .unwrap();

        direct.set(Level::High);
        inverted.set(Level::Low);
        scanner.scan();
        scan_for(&mut scanner, 30);
        direct.set(Level::Low);
        inverted.set(Level::High);

        let fired = scanner.scan();
        assert_eq!(fired, &[(a, Event::ShortUp), (b, Event::ShortUp)]);
    }

    #[test]
    fn buttons_pressed_together_are_classified_together() {
        let lines = [Cell::new(Level::Low), Cell::new(Level::Low)];
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();
        let a = scanner.register(active_high(0, &lines[0])).unwrap();
        let b = scanner.register(active_high(1, &lines[1])).unwrap();

        for line in &lines {
            line.set(Level::High);
        }
        scanner.scan();
        scan_for(&mut scanner, 2);
        for line in &lines {
            line.set(Level::Low);
        }
        scanner.scan();
        scan_for(&mut scanner, CONFIG.release_window_ticks);

        assert_eq!(scanner.scan(), &[(a, Event::Click), (b, Event::Click)]);
    }

    #[test]
    fn a_double_click_across_the_scan_matches_the_worked_example() {
        // 50 Hz: 200 ms short press threshold, 300 ms release window.
        let line = Cell::new(Level::Low);
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();
        let id = scanner.register(active_high(0, &line)).unwrap();

        for _ in 0..2 {
            line.set(Level::High);
            scanner.scan();
            scan_for(&mut scanner, 2);
            line.set(Level::Low);
            scanner.scan();
            scan_for(&mut scanner, 5);
        }

        let mut fired = StdVec::new();
        for _ in 0..=CONFIG.release_window_ticks {
            fired.extend_from_slice(scanner.scan());
        }
        assert_eq!(fired, vec![(id, Event::DoubleClick)]);
    }

    fn events_of_first(sequences: &[&[bool]]) -> StdVec<(u32, Event)> {
        let lines: StdVec<Cell<Level>> = sequences.iter().map(|_| Cell::new(Level::Low)).collect();
        let mut scanner: Scanner<Probe<'_>> = Scanner::new();
        for (i, _) in sequences.iter().enumerate() {
            scanner
                .register(active_high(i as u8, &lines[i]))
                .unwrap();
        }

        let ticks = sequences.iter().map(|s| s.len()).max().unwrap_or(0);
        let mut trace = StdVec::new();
        for tick in 0..ticks {
            for (i, sequence) in sequences.iter().enumerate() {
                let pressed = sequence.get(tick).copied().unwrap_or(false);
                lines[i].set(if pressed { Level::High } else { Level::Low });
            }
            for (id, event) in scanner.scan() {
                if id.index() == 0 {
                    trace.push((tick as u32, *event));
                }
            }
        }
        trace
    }

    proptest! {
        #[test]
        fn classification_depends_only_on_the_buttons_own_levels(
            own in prop::collection::vec(any::<bool>(), 1..200),
            other in prop::collection::vec(any::<bool>(), 1..200),
        ) {
            let alone = events_of_first(&[own.as_slice()]);
            let accompanied = events_of_first(&[own.as_slice(), other.as_slice()]);
            prop_assert_eq!(alone, accompanied);
        }
    }
}
