//! Event publication: the producer capability, its in-memory transport, and
//! the typed per-resource producers handed to use cases.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;
pub mod producer;

pub use bus::{MessageProducer, ProducerError, Subscription};
pub use envelope::Message;
pub use event::{AddressEvent, ContactEvent, Event, EventAction, UserEvent};
pub use in_memory_bus::InMemoryProducer;
pub use producer::{AddressProducer, ContactProducer, Producer, UserProducer};
