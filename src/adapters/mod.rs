// Adapters layer: concrete implementations for external systems (database, storage).

pub mod postgres;
pub mod storage;
