//! Domain layer: plug events, input validation, and the broadcast bus.
//!
//! Producers turn raw request parameters into a [`PlugEvent`] through
//! [`validate`] and hand it to the [`EventBus`], which fans it out to
//! every registered [`Subscription`].

pub mod event_bus;
pub mod plug_event;
pub mod subscriber_id;
pub mod validator;

pub use event_bus::{EventBus, Subscription};
pub use plug_event::{MAX_PLUG_INDEX, PLUG_COUNT, PlugEvent};
pub use subscriber_id::SubscriberId;
pub use validator::validate;
