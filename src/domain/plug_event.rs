//! The plug state change event carried through the relay.
//!
//! A [`PlugEvent`] is immutable once built and always names one of the
//! [`PLUG_COUNT`] addressable plugs. Its JSON form is the wire payload sent
//! to every WebSocket consumer:
//!
//! ```json
//! {"Plug": 3, "State": true}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of addressable plugs.
pub const PLUG_COUNT: u8 = 5;

/// Highest valid plug index.
pub const MAX_PLUG_INDEX: u8 = PLUG_COUNT - 1;

/// One plug state change: which plug, and whether it should be on.
///
/// Field names are serialized capitalized (`Plug`, `State`); consumers
/// depend on that exact shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPlugEvent")]
pub struct PlugEvent {
    #[serde(rename = "Plug")]
    plug: u8,
    #[serde(rename = "State")]
    state: bool,
}

impl PlugEvent {
    /// Builds an event for `plug`, switching it on when `state` is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `plug` is not in
    /// `0..=MAX_PLUG_INDEX`.
    pub fn new(plug: i64, state: bool) -> Result<Self, ValidationError> {
        u8::try_from(plug)
            .ok()
            .filter(|index| *index <= MAX_PLUG_INDEX)
            .map(|plug| Self { plug, state })
            .ok_or(ValidationError::OutOfRange(plug))
    }

    /// Index of the targeted plug.
    #[must_use]
    pub const fn plug(&self) -> u8 {
        self.plug
    }

    /// Requested state; `true` means on.
    #[must_use]
    pub const fn state(&self) -> bool {
        self.state
    }
}

impl fmt::Display for PlugEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.state { "on" } else { "off" };
        write!(f, "plug {} -> {state}", self.plug)
    }
}

/// Unchecked wire shape, validated into a [`PlugEvent`] on deserialize.
#[derive(Deserialize)]
struct RawPlugEvent {
    #[serde(rename = "Plug")]
    plug: i64,
    #[serde(rename = "State")]
    state: bool,
}

impl TryFrom<RawPlugEvent> for PlugEvent {
    type Error = ValidationError;

    fn try_from(raw: RawPlugEvent) -> Result<Self, Self::Error> {
        Self::new(raw.plug, raw.state)
    }
}
