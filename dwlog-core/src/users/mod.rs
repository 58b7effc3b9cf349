//! Flat-file user administration.
//!
//! Users live in one JSON array on disk. Every operation re-reads the
//! file, so edits made by hand are picked up without a restart.

mod error;
mod store;
mod types;


pub use error::UserError;
pub use store::UserStore;
pub use types::{LoginRequest, NewUser, User, UserPatch, UserSelector};
