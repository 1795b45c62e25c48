//! The three execution contexts behind the manager: the poll timer, the
//! single store writer, and the view-owning consumer. They communicate
//! exclusively over channels; nothing mutates state across a context
//! boundary.

mod consumer;
mod poller;
mod writer;

pub use poller::{PollLoop, DEFAULT_POLL_INTERVAL};
pub use writer::StoreCommand;

pub(crate) use consumer::{spawn_consumer, ModelUpdate};
pub(crate) use writer::spawn_writer;
