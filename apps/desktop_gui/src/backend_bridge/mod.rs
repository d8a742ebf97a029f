//! Bridge between the UI thread and the async worker that talks to the API.

pub mod commands;
pub mod runtime;
