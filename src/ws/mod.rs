//! WebSocket layer: the `/output` endpoint and subscriber sessions.
//!
//! Every connection on `/output` becomes a [`session::SubscriberSession`]
//! that receives each published plug event as one JSON text frame.
//! Consumers are not expected to send anything.

pub mod handler;
pub mod session;
