pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod models;
pub mod service;
pub mod storage;

pub use directory::in_memory::InMemoryChannelDirectory;
pub use error::LedgerError;
pub use identity::in_memory::InMemoryIdentityResolver;
pub use service::LedgerService;
pub use storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
