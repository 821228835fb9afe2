pub mod manager;
pub mod memory;
pub mod postgres;
pub mod query_builder;
pub mod schema;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::{Column, ColumnKind, TableSchema};
pub use store::{Store, StoreError, StoreRecord};
