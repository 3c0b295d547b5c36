// Room store backends (data access layer)
// Adapters that implement the coordinator's store interface

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRoomStore;
pub use postgres::PostgresRoomStore;
