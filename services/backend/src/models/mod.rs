//! Backend service models

pub mod item;
pub mod request;
pub mod user;

// Re-export for convenience
pub use item::{Item, ItemStatus, NewItem, UpdateItem};
pub use request::{NewRequest, Request, RequestStatus};
pub use user::{NewUser, UpdateUser, User, UserRole};
