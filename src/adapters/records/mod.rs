//! Payment record stores.

mod in_memory;

pub use in_memory::InMemoryPaymentRecords;
