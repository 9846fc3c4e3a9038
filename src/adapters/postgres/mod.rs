//! PostgreSQL adapters.

mod payment_record_store;

pub use payment_record_store::PgPaymentRecordStore;
