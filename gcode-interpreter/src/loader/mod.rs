//! Loading entry points for [`Interpreter`](crate::Interpreter).
//!
//! `stream` drives a tokio reader line by line and reports through events;
//! `blocking` tokenizes the whole input up front and returns the lines directly.

mod blocking;
mod stream;
