//! Discrete input signals

use std::fmt;

/// The two signals the input surface can emit.
///
/// Signals carry no payload and are dispatched synchronously, one at a time,
/// in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The user tapped the view: place the next image
    ScreenTapped,
    /// The user asked to clear everything placed so far
    Reset,
}

impl Signal {
    /// Signal name for logging
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ScreenTapped => "screen_tapped",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
