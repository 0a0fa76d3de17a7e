//! Level source backed by an embedded-hal input pin.

use core::convert::Infallible;

use embedded_hal::digital::v2::InputPin;
use tlacitko_control::{Level, ReadLevel};

/// Adapts an infallible input pin into a level source.
///
/// HALs with fallible pins need to erase the error before the pin fits
/// here; a scan tick has nowhere to report a read failure to.
#[derive(Debug)]
pub struct PinReader<P> {
    pin: P,
}

impl<P> PinReader<P>
where
    P: InputPin<Error = Infallible>,
{
    #[must_use]
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> ReadLevel for PinReader<P>
where
    P: InputPin<Error = Infallible>,
{
    fn read_level(&mut self) -> Level {
        match self.pin.is_high() {
            Ok(true) => Level::High,
            Ok(false) => Level::Low,
            Err(never) => match never {},
        }
    }
}
