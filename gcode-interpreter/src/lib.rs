//! G-code command interpreter.
//!
//! Tokenized lines are split into command groups: every `G`/`M` word starts a group and the
//! words after it become its arguments. A group without its own command word continues the
//! last command seen (modal continuation), so
//!
//! ```text
//! G02 X0 Y5 I5 J0
//!  X5 Y0 I0 J-5
//! ```
//!
//! dispatches `G2` twice. Each resolved command goes to the caller's [`Handlers`] first and
//! then to the [`Machine`]'s own method of the same code.
//!
//! ```
//! use std::sync::{
//! 	atomic::{AtomicUsize, Ordering},
//! 	Arc,
//! };
//!
//! use gcode_interpreter::{Handlers, Interpreter};
//!
//! let arcs = Arc::new(AtomicUsize::new(0));
//! let counter = arcs.clone();
//! let handlers = Handlers::new().with("G2", move |_args| {
//! 	counter.fetch_add(1, Ordering::Relaxed);
//! 	Ok(())
//! });
//!
//! let mut interpreter = Interpreter::new(handlers);
//! let lines = interpreter.load_from_string_sync("G02 X0 Y5 I5 J0\nX5 Y0 I0 J-5\n").unwrap();
//!
//! assert_eq!(lines.len(), 2);
//! assert_eq!(arcs.load(Ordering::Relaxed), 2);
//! ```
//!
//! Programs can be loaded from a tokio reader, a file or a string (`load_from_*`, with
//! lifecycle [`Event`]s), or synchronously (`load_from_*_sync`).

mod error;
mod events;
mod gcode;
mod loader;

pub use error::{ErrorKind, LoadError};
pub use events::{Event, Progress};
pub use gcode::{
	group_words, parse, parse_line, Args, Command, DispatchError, GcodeLetter, GcodeLine, GcodeValue, GcodeWord, Handler,
	HandlerError, HandlerResult, Handlers, Interpreter, Machine, Method, MethodTable, ModalState, Options, ParserError,
	ParserErrorReason, DEFAULT_READ_CAPACITY,
};
