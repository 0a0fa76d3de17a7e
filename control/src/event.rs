//! Events reported for classified button activity.

/// Classification of one button's activity.
///
/// Discriminants are stable and part of the public surface. The click
/// tier occupies the contiguous range 1 to 8, ordered by the number of
/// presses it stands for; consumers may rely on that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Event {
    /// Initial press edge. Never produced by the classifier, which only
    /// reports a press once its duration is known; the code is kept for
    /// consumers with a full event table.
    PressDown = 0,
    /// Single press, reported once the release window expires.
    Click = 1,
    DoubleClick = 2,
    TripleClick = 3,
    QuadraClick = 4,
    PentaClick = 5,
    HexaClick = 6,
    GodlikeClick = 7,
    /// Top of the click tier. Sequences longer than eight presses
    /// report nothing at all.
    LegendaryClick = 8,
    /// Press held past the short press threshold, reported while still
    /// held.
    ShortStart = 9,
    /// Release after a short press.
    ShortUp = 10,
    /// Press held past the long press threshold.
    LongStart = 11,
    /// Release after a long press.
    LongUp = 12,
    /// Press held past the long hold threshold.
    LongHold = 13,
    /// Release after a long hold.
    LongHoldUp = 14,
}

impl Event {
    /// The click tier event for a sequence of `presses` presses.
    #[must_use]
    pub fn click(presses: u32) -> Option<Self> {
        match presses {
            1 => Some(Event::Click),
            2 => Some(Event::DoubleClick),
            3 => Some(Event::TripleClick),
            4 => Some(Event::QuadraClick),
            5 => Some(Event::PentaClick),
            6 => Some(Event::HexaClick),
            7 => Some(Event::GodlikeClick),
            8 => Some(Event::LegendaryClick),
            _ => None,
        }
    }

    /// Stable numeric code of the event.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the event belongs to the multi-click tier.
    #[must_use]
    pub fn is_click(self) -> bool {
        matches!(self.code(), 1..=8)
    }
}
