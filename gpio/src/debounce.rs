//! Majority-vote filtering of bouncy input lines.

use tlacitko_control::{Level, ReadLevel};

/// Reports the majority level of the last `N` raw reads.
///
/// Wraps any level source; one raw read happens per [`read_level`]
/// call, so `N` spans `N` scan ticks. Size the window to cover the
/// line's bounce period at the scan cadence. The window starts filled
/// with the line's resting level, keeping an active-low line from
/// reading as pressed before the first real samples arrive.
///
/// [`read_level`]: ReadLevel::read_level
#[derive(Debug, PartialEq, Eq)]
pub struct Debounced<R, const N: usize> {
    reader: R,
    window: [Level; N],
    cursor: usize,
}

impl<R: ReadLevel, const N: usize> Debounced<R, N> {
    #[must_use]
    pub fn new(reader: R, resting: Level) -> Self {
        Self {
            reader,
            window: [resting; N],
            cursor: 0,
        }
    }

    fn majority(&self) -> Level {
        let high = self.window.iter().filter(|l| **l == Level::High).count();
        if high > N / 2 {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl<R: ReadLevel, const N: usize> ReadLevel for Debounced<R, N> {
    fn read_level(&mut self) -> Level {
        self.window[self.cursor] = self.reader.read_level();
        self.cursor = (self.cursor + 1) % N;
        self.majority()
    }
}
