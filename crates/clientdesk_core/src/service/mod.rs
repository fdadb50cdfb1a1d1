//! Use-case services above commands and storage.

pub mod dispatcher;

pub use dispatcher::{CommandDispatcher, DispatchError};
