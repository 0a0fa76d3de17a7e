//! Wiring and timing configuration of a scanned button.

/// Logic level of a digital input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Convert a duration in milliseconds to scan ticks.
///
/// `scan_hz` is the frequency at which the caller invokes the scan. All
/// thresholds in [`Config`] are expressed in ticks of that cadence.
#[must_use]
pub const fn ticks_from_millis(scan_hz: u32, millis: u32) -> u32 {
    millis / (1000 / scan_hz)
}

/// Tick thresholds classifying press durations.
///
/// The caller populates these once, typically through
/// [`ticks_from_millis`], before registering the button. Thresholds are
/// expected to be ordered `short_press_ticks < long_press_ticks <
/// long_hold_ticks`; an unordered configuration classifies without
/// failing, just not meaningfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Recognized but not applied by the classifier. Lines that bounce
    /// need a debounce filter in front of the level source.
    pub debounce_ticks: u32,
    /// Recognized but not applied by the classifier.
    pub click_start_ticks: u32,
    /// Presses released at or under this count enter the multi-click
    /// release window instead of reporting a press phase.
    pub short_press_ticks: u32,
    /// Held counts above this classify as a long press.
    pub long_press_ticks: u32,
    /// Held counts above this classify as a long hold.
    pub long_hold_ticks: u32,
    /// Longest gap between a release and the next press still counted
    /// into the same multi-click sequence.
    pub release_window_ticks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_follow_the_scan_frequency() {
        assert_eq!(ticks_from_millis(50, 200), 10);
        assert_eq!(ticks_from_millis(50, 1000), 50);
        assert_eq!(ticks_from_millis(100, 200), 20);
    }

    #[test]
    fn durations_under_one_tick_round_down_to_zero() {
        assert_eq!(ticks_from_millis(50, 15), 0);
    }
}
