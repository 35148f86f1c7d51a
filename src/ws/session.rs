//! Subscriber session state machine.
//!
//! A session moves `Connecting → Active → Closed`. It becomes active when
//! it subscribes to the [`EventBus`], writes one text frame per delivered
//! event, and closes on the first transport error, on a close frame from
//! the peer, or when the bus evicts it. Closing unsubscribes exactly once.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use crate::domain::{EventBus, PlugEvent, SubscriberId, Subscription};
use crate::error::SessionError;

/// Lifecycle of a [`SubscriberSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Handshake in progress; not registered with the bus.
    Connecting,
    /// Registered and forwarding events.
    Active,
    /// Unsubscribed. Terminal.
    Closed,
}

/// One connected consumer.
#[derive(Debug)]
pub struct SubscriberSession {
    subscription: Subscription,
    state: SessionState,
}

impl SubscriberSession {
    /// Subscribes to `bus`, moving the session from `Connecting` to `Active`.
    #[must_use]
    pub fn connect(bus: &EventBus) -> Self {
        let subscription = bus.subscribe();
        tracing::debug!(
            subscriber = %subscription.id(),
            from = ?SessionState::Connecting,
            to = ?SessionState::Active,
            "session state changed"
        );
        Self {
            subscription,
            state: SessionState::Active,
        }
    }

    /// Identifier of the underlying bus registration.
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.subscription.id()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Forwards events to `sink` until the peer goes away or a write fails.
    ///
    /// `stream` is the inbound half of the same transport; it is only
    /// watched for closure. The session is `Closed` when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] on a read or write failure and
    /// [`SessionError::Evicted`] if the bus dropped this subscriber.
    /// A clean close from the peer is `Ok(())`.
    pub async fn run<Tx, Rx>(mut self, mut sink: Tx, mut stream: Rx) -> Result<(), SessionError>
    where
        Tx: Sink<Message, Error = axum::Error> + Unpin,
        Rx: Stream<Item = Result<Message, axum::Error>> + Unpin,
    {
        let outcome = loop {
            tokio::select! {
                inbound = stream.next() => match inbound {
                    Some(Ok(Message::Close(_))) | None => break Ok(()),
                    Some(Err(err)) => break Err(SessionError::Transport(err)),
                    Some(Ok(_)) => {}
                },
                delivered = self.subscription.recv() => match delivered {
                    Some(event) => {
                        if let Err(err) = forward(&mut sink, event).await {
                            break Err(err);
                        }
                    }
                    None => break Err(SessionError::Evicted),
                },
            }
        };

        self.close();
        let _ = sink.close().await;
        outcome
    }

    /// Moves to `Closed` and unsubscribes. Later calls do nothing.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.subscription.close();
        tracing::debug!(
            subscriber = %self.id(),
            from = ?self.state,
            to = ?SessionState::Closed,
            "session state changed"
        );
        self.state = SessionState::Closed;
    }
}

async fn forward<Tx>(sink: &mut Tx, event: PlugEvent) -> Result<(), SessionError>
where
    Tx: Sink<Message, Error = axum::Error> + Unpin,
{
    tracing::info!(
        plug = event.plug(),
        state = event.state(),
        "received plug event"
    );
    let payload = serde_json::to_string(&event)?;
    sink.send(Message::text(payload))
        .await
        .map_err(SessionError::Transport)
}

/// Runs a session over an upgraded WebSocket until it closes.
pub async fn serve(socket: WebSocket, bus: EventBus) {
    let session = SubscriberSession::connect(&bus);
    let id = session.id();
    let (sink, stream) = socket.split();

    match session.run(sink, stream).await {
        Ok(()) => tracing::debug!(subscriber = %id, "consumer disconnected"),
        Err(SessionError::Evicted) => {
            tracing::warn!(subscriber = %id, "consumer evicted for falling behind");
        }
        Err(err) => tracing::debug!(subscriber = %id, error = %err, "consumer session ended"),
    }
}
