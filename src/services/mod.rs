// Service exports
pub mod memory;
pub mod postgres;
pub mod source;
pub mod store;
pub mod validator;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use source::{HttpProfileSource, ProfileSource, SourceError};
pub use store::{ProfileStore, StoreError};
pub use validator::{HttpMatchValidator, MatchValidator, ValidatorError};
