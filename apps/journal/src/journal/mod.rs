// The journal: entry model, the append-only store, and read-side handlers.

pub mod entry;
pub mod handlers;
pub mod store;
