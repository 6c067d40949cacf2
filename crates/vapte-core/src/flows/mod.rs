//! Interaction flows against the transformation service.
//!
//! Each flow is one network round trip plus the UI events it produces.
//! The flows are stateless across invocations: nothing carries over
//! except what the token store persists.

pub mod login;
pub mod register;
pub mod session;
pub mod upload;

pub use login::LoginOutcome;
pub use register::{RegisterOutcome, Registration};
pub use upload::UploadOutcome;
