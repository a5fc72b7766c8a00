//! Repositories for database operations

pub mod item;
pub mod request;
pub mod user;

// Re-export for convenience
pub use item::ItemRepository;
pub use request::RequestRepository;
pub use user::UserRepository;
