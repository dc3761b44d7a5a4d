pub mod memory;
pub mod file;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::MemoryStorage;
pub use file::FileStorage;

#[cfg(feature = "sqlite")]
pub use sqlite::SQLiteStorage;
