pub mod user;

pub use user::{AuthUser, SessionView};
