//! Use cases: validated operations over the repositories.
//!
//! They are synchronous; the in-memory store never blocks for long, so the
//! handlers call them directly. Events are published after a successful write
//! when a producer is wired in. A failed publish is logged, never surfaced.

use std::sync::Arc;

use contactbook_events::{Event, EventAction, Producer};

pub mod address;
pub mod contact;
pub mod user;

pub use address::AddressUseCase;
pub use contact::ContactUseCase;
pub use user::UserUseCase;

fn publish<E: Event>(producer: Option<&Arc<Producer<E>>>, event: &E, action: EventAction) {
    let Some(producer) = producer else {
        return;
    };
    if let Err(e) = producer.send(event, action) {
        tracing::warn!(topic = producer.topic(), key = %event.key(), error = %e, "failed to publish event");
    }
}
