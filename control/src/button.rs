//! Per-button descriptor and press classification.

use crate::config::{Config, Level};
use crate::event::Event;

/// Reads the raw logic level of a single input line.
///
/// Implemented by whatever backs the button: a GPIO pin, a shift
/// register bit, a simulated input in tests. The read must be cheap;
/// it runs for every registered button on every scan tick.
pub trait ReadLevel {
    fn read_level(&mut self) -> Level;
}

/// Classification progress of a single button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Released, no sequence in flight.
    #[default]
    Idle,
    /// Held down, measuring the press duration.
    Pressed,
    /// Released within the short press threshold, waiting whether
    /// another press extends the multi-click sequence.
    ReleaseWindow,
}

/// One physical button: wiring, thresholds and classification state.
///
/// Built by the application and moved into a
/// [`Scanner`](crate::Scanner) at registration. From then on it is
/// mutated exclusively by the scan and read back through the scanner's
/// accessors.
#[derive(Debug)]
pub struct Button<R> {
    code: u8,
    active_level: Level,
    config: Config,
    reader: R,
    state: State,
    event: Option<Event>,
    scan_count: u32,
    click_count: u32,
}

impl<R: ReadLevel> Button<R> {
    /// A released, event-free button.
    ///
    /// `code` is the application's identity for the button, for example
    /// a key code; the registry rejects duplicates. `active_level` is
    /// the raw level meaning "pressed", so inverted wiring classifies
    /// the same as direct wiring.
    #[must_use]
    pub fn new(code: u8, active_level: Level, config: Config, reader: R) -> Self {
        Self {
            code,
            active_level,
            config,
            reader,
            state: State::Idle,
            event: None,
            scan_count: 0,
            click_count: 0,
        }
    }

    #[must_use]
    pub fn code(&self) -> u8 {
        self.code
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    /// The most recent classification, cleared one idle tick later.
    #[must_use]
    pub fn event(&self) -> Option<Event> {
        self.event
    }

    /// Samples the line and normalizes it against the wiring.
    pub(crate) fn is_pressed(&mut self) -> bool {
        self.reader.read_level() == self.active_level
    }

    /// Advances the classification by one tick.
    ///
    /// `toggled` is the sampler's verdict on whether the normalized
    /// level changed since the previous tick. Returns the event fired
    /// during this tick, if any.
    pub(crate) fn step(&mut self, toggled: bool) -> Option<Event> {
        if self.state != State::Idle {
            self.scan_count = self.scan_count.saturating_add(1);
        }

        match self.state {
            State::Idle => {
                if toggled {
                    // A press edge; entering idle always follows a
                    // release. The bare edge itself is not reported.
                    self.scan_count = 0;
                    self.click_count = 0;
                    self.state = State::Pressed;
                } else {
                    self.event = None;
                }
                None
            }
            State::Pressed => {
                if toggled {
                    self.release()
                } else {
                    self.hold()
                }
            }
            State::ReleaseWindow => {
                if self.scan_count > self.config.release_window_ticks {
                    self.state = State::Idle;
                    match Event::click(self.click_count + 1) {
                        Some(event) => self.fire(event),
                        None => None,
                    }
                } else if toggled {
                    self.click_count += 1;
                    self.scan_count = 0;
                    self.state = State::Pressed;
                    None
                } else {
                    None
                }
            }
        }
    }

    /// A release edge while pressed.
    fn release(&mut self) -> Option<Event> {
        if self.scan_count <= self.config.short_press_ticks {
            // Not yet a qualifying short press; it may still extend
            // into a multi-click sequence.
            self.state = State::ReleaseWindow;
            self.scan_count = 0;
            return None;
        }

        let event = if self.scan_count > self.config.long_hold_ticks {
            Event::LongHoldUp
        } else if self.scan_count > self.config.long_press_ticks {
            Event::LongUp
        } else {
            Event::ShortUp
        };
        self.state = State::Idle;
        self.fire(event)
    }

    /// Still held; fire the reached press phase exactly once.
    fn hold(&mut self) -> Option<Event> {
        let reached = if self.scan_count > self.config.long_hold_ticks {
            Event::LongHold
        } else if self.scan_count > self.config.long_press_ticks {
            Event::LongStart
        } else if self.scan_count > self.config.short_press_ticks {
            Event::ShortStart
        } else {
            return None;
        };

        if self.event == Some(reached) {
            None
        } else {
            self.fire(reached)
        }
    }

    fn fire(&mut self, event: Event) -> Option<Event> {
        self.event = Some(event);
        Some(event)
    }
}
