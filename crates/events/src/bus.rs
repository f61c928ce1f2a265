//! Producer capability (mechanics only).
//!
//! The API layer only ever needs to *publish a named event*; it never awaits a
//! reply and never consumes. Anything that can accept a [`Message`] can stand
//! in as the producer handle: an in-memory fan-out for dev/test, or a broker
//! client in a real deployment.
//!
//! Delivery is best-effort from the caller's point of view: a failed publish is
//! reported back as [`ProducerError`] and the caller decides whether to log and
//! move on (use cases do) or propagate.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use thiserror::Error;

use crate::envelope::Message;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProducerError {
    /// Internal lock poisoning in an in-process transport.
    #[error("producer state poisoned")]
    Poisoned,

    /// The event payload could not be encoded.
    #[error("failed to encode event: {0}")]
    Encode(String),

    /// The transport refused the message.
    #[error("transport rejected message: {0}")]
    Transport(String),
}

/// A subscription to published messages (broadcast semantics).
///
/// Designed for single-threaded consumption; each subscriber receives a copy
/// of every message published after it subscribed.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// "Publish a named event" capability.
///
/// Requires `Send + Sync`: one handle is shared by every use case and invoked
/// from concurrent request tasks.
pub trait MessageProducer: Send + Sync {
    fn send(&self, message: Message) -> Result<(), ProducerError>;
}

impl<P> MessageProducer for Arc<P>
where
    P: MessageProducer + ?Sized,
{
    fn send(&self, message: Message) -> Result<(), ProducerError> {
        (**self).send(message)
    }
}
