//! Typed producers: one per resource, all sharing one transport handle.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::bus::{MessageProducer, ProducerError};
use crate::envelope::Message;
use crate::event::{AddressEvent, ContactEvent, Event, EventAction, UserEvent};

/// Publishes events of type `E` to `E::TOPIC`.
pub struct Producer<E> {
    handle: Arc<dyn MessageProducer>,
    _event: PhantomData<fn(&E)>,
}

pub type UserProducer = Producer<UserEvent>;
pub type ContactProducer = Producer<ContactEvent>;
pub type AddressProducer = Producer<AddressEvent>;

impl<E: Event> Producer<E> {
    pub fn new(handle: Arc<dyn MessageProducer>) -> Self {
        Self {
            handle,
            _event: PhantomData,
        }
    }

    pub fn topic(&self) -> &'static str {
        E::TOPIC
    }

    pub fn send(&self, event: &E, action: EventAction) -> Result<(), ProducerError> {
        let payload =
            serde_json::to_value(event).map_err(|e| ProducerError::Encode(e.to_string()))?;
        let event_type = format!("{}.{}", E::RESOURCE, action.as_str());

        tracing::debug!(topic = E::TOPIC, key = %event.key(), %event_type, "publishing event");
        self.handle
            .send(Message::new(E::TOPIC, event.key(), event_type, payload))
    }
}

impl<E> core::fmt::Debug for Producer<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Producer")
            .field("event", &core::any::type_name::<E>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory_bus::InMemoryProducer;

    #[test]
    fn contact_events_land_on_the_contacts_topic() {
        let transport = Arc::new(InMemoryProducer::new());
        let sub = transport.subscribe();
        let producer = ContactProducer::new(transport.clone());

        let event = ContactEvent {
            id: "c-1".to_string(),
            user_id: "alice".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Smith".to_string(),
            email: "bob@example.com".to_string(),
            phone: "555".to_string(),
            created_at: 1,
            updated_at: 1,
        };
        producer.send(&event, EventAction::Created).unwrap();

        let msg = sub.try_recv().unwrap();
        assert_eq!(msg.topic(), "contacts");
        assert_eq!(msg.key(), "c-1");
        assert_eq!(msg.event_type(), "contact.created");
        assert_eq!(msg.payload()["first_name"], "Bob");
    }

    #[test]
    fn user_events_never_carry_password_material() {
        let transport = Arc::new(InMemoryProducer::new());
        let sub = transport.subscribe();
        let producer = UserProducer::new(transport.clone());

        let event = UserEvent {
            id: "alice".to_string(),
            name: "Alice".to_string(),
            created_at: 1,
            updated_at: 2,
        };
        producer.send(&event, EventAction::Updated).unwrap();

        let msg = sub.try_recv().unwrap();
        assert_eq!(msg.event_type(), "user.updated");
        assert!(msg.payload().get("password_hash").is_none());
        assert!(msg.payload().get("token").is_none());
    }
}
