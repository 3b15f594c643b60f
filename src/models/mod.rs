pub mod user;
pub mod event;

pub use user::{Role, User, UserProfile};
pub use event::Event;
