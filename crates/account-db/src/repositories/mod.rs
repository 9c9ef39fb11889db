//! Repository implementations

mod account;
mod error;
mod memory;

pub use account::PgAccountRepository;
pub use error::{map_db_error, map_unique_violation};
pub use memory::MemoryAccountRepository;
