//! House directory storage.
//!
//! Access goes through the [`HouseRepository`] trait so handlers never see
//! where houses come from. The only backend is the in-memory
//! [`LocalRepository`], loaded from JSON at startup.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  HTTP handlers / services                │
//! └───────────────────┬──────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────┐
//! │  HouseRepository (repository.rs)         │
//! └───────────────────┬──────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────┐
//! │  LocalRepository (embedded seed or file) │
//! └──────────────────────────────────────────┘
//! ```

pub mod error;
pub mod factory;
pub mod local;
pub mod repository;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use factory::RepositoryFactory;
pub use local::LocalRepository;
pub use repository::HouseRepository;
