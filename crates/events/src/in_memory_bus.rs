//! In-memory producer for tests/dev.

use std::sync::{Mutex, mpsc};

use crate::bus::{MessageProducer, ProducerError, Subscription};
use crate::envelope::Message;

/// In-memory pub/sub transport.
///
/// - No IO / no async
/// - Best-effort fan-out to every live subscriber
/// - Publishing with no subscribers succeeds and drops the message
#[derive(Debug, Default)]
pub struct InMemoryProducer {
    subscribers: Mutex<Vec<mpsc::Sender<Message>>>,
}

impl InMemoryProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription<Message> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

impl MessageProducer for InMemoryProducer {
    fn send(&self, message: Message) -> Result<(), ProducerError> {
        let mut subs = self.subscribers.lock().map_err(|_| ProducerError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(key: &str) -> Message {
        Message::new("contacts", key, "contact.created", serde_json::json!({ "id": key }))
    }

    #[test]
    fn every_subscriber_receives_a_copy() {
        let producer = InMemoryProducer::new();
        let a = producer.subscribe();
        let b = producer.subscribe();

        producer.send(message("c-1")).unwrap();

        assert_eq!(a.try_recv().unwrap().key(), "c-1");
        assert_eq!(b.try_recv().unwrap().key(), "c-1");
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let producer = InMemoryProducer::new();
        let kept = producer.subscribe();
        drop(producer.subscribe());

        producer.send(message("c-2")).unwrap();
        assert_eq!(producer.subscribers.lock().unwrap().len(), 1);
        assert_eq!(kept.try_recv().unwrap().topic(), "contacts");
    }

    #[test]
    fn publishing_without_subscribers_is_ok() {
        let producer = InMemoryProducer::new();
        assert!(producer.send(message("c-3")).is_ok());
    }
}
