use std::collections::HashMap;

use thiserror::Error;

use super::{
	dispatch::{Dispatcher, HandlerError, Handlers, Machine},
	parser::{GcodeLetter, GcodeLine, GcodeValue, GcodeWord},
};
use crate::events::{Event, Notifier, Progress};
use crate::error::LoadError;


/// Default capacity of the buffered reader used by the streaming loaders.
pub const DEFAULT_READ_CAPACITY: usize = 8 * 1024;


/// Arguments of a resolved command, by letter.
pub type Args = HashMap<GcodeLetter, GcodeValue>;


/// A command code together with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
	/// e.g. `G1`; empty when no command has been seen yet
	pub code: String,
	pub args: Args,
}


/// Splits a line into command groups.
/// Every `G`/`M` word opens a new group; any other word joins the open group, or opens one if
/// the line does not start with a command.
pub fn group_words(words: &[GcodeWord]) -> Vec<&[GcodeWord]> {
	let mut groups = Vec::new();
	let mut start = 0;

	for (i, word) in words.iter().enumerate() {
		if word.is_command() && i > start {
			groups.push(&words[start..i]);
			start = i;
		}
	}

	if start < words.len() {
		groups.push(&words[start..]);
	}

	groups
}


/// The sticky command carried from one group to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
	current_command: String,
}

impl ModalState {
	pub fn current_command(&self) -> &str {
		&self.current_command
	}

	/// Resolves one group.
	/// A group led by a `G`/`M` word names its own command and updates the state; any other
	/// group continues the current command and keeps all of its words as arguments.
	pub fn resolve(&mut self, group: &[GcodeWord]) -> Command {
		match group.split_first() {
			Some((first, rest)) if first.is_command() => {
				self.current_command = first.to_string();
				Command {
					code: self.current_command.clone(),
					args: collect_args(rest),
				}
			},
			_ => Command {
				code: self.current_command.clone(),
				args: collect_args(group),
			},
		}
	}

	pub fn reset(&mut self) {
		self.current_command.clear();
	}
}

// Later duplicates win
fn collect_args(words: &[GcodeWord]) -> Args {
	words.iter().map(|w| (w.letter, w.value.clone())).collect()
}


/// A command handler or method failed.
#[derive(Debug, Error)]
#[error("{code} failed at line {line}: {source}")]
pub struct DispatchError {
	pub code: String,
	pub line: usize,
	#[source]
	pub source: HandlerError,
}


/// Construction options for an [`Interpreter`].
#[derive(Debug)]
pub struct Options {
	pub handlers: Handlers,
	/// Buffer size for the streaming loaders
	pub read_capacity: usize,
}

impl Options {
	pub fn with_handlers(mut self, handlers: Handlers) -> Self {
		self.handlers = handlers;
		self
	}

	pub fn with_read_capacity(mut self, read_capacity: usize) -> Self {
		self.read_capacity = read_capacity.max(1);
		self
	}
}

impl Default for Options {
	fn default() -> Self {
		Self {
			handlers: Handlers::default(),
			read_capacity: DEFAULT_READ_CAPACITY,
		}
	}
}

impl From<Handlers> for Options {
	fn from(handlers: Handlers) -> Self {
		Options::default().with_handlers(handlers)
	}
}


/// Turns tokenized lines into dispatched commands.
///
/// Modal state and the handler table live on the interpreter and survive across loads:
/// loading the same program twice fires every handler twice, and the second load starts with
/// the last command of the first one. Call [`Interpreter::reset`] for a clean slate.
pub struct Interpreter<M = ()> {
	dispatcher: Dispatcher<M>,
	modal: ModalState,
	notifier: Notifier,
	pub(crate) read_capacity: usize,
}

impl Interpreter<()> {
	pub fn new(options: impl Into<Options>) -> Self {
		Self::with_machine((), options)
	}
}

impl Default for Interpreter<()> {
	fn default() -> Self {
		Self::new(Options::default())
	}
}

impl<M: Machine> Interpreter<M> {
	pub fn with_machine(machine: M, options: impl Into<Options>) -> Self {
		let options = options.into();
		Self {
			dispatcher: Dispatcher::new(machine, options.handlers),
			modal: ModalState::default(),
			notifier: Notifier::default(),
			read_capacity: options.read_capacity,
		}
	}

	pub fn machine(&self) -> &M {
		&self.dispatcher.machine
	}

	pub fn machine_mut(&mut self) -> &mut M {
		&mut self.dispatcher.machine
	}

	pub fn into_machine(self) -> M {
		self.dispatcher.machine
	}

	/// The command a line without its own `G`/`M` word continues.
	pub fn current_command(&self) -> &str {
		self.modal.current_command()
	}

	/// Forgets the current modal command.
	pub fn reset(&mut self) {
		self.modal.reset();
	}

	/// Resolves and dispatches every group of `line`, in order.
	pub fn interpret(&mut self, line: &GcodeLine) -> Result<(), DispatchError> {
		for group in group_words(&line.words) {
			let command = self.modal.resolve(group);
			tracing::trace!(code = %command.code, line = line.number, "dispatching command");

			self.dispatcher.dispatch(&command).map_err(|source| DispatchError {
				code: command.code,
				line: line.number,
				source,
			})?;
		}

		Ok(())
	}

	/// Registers a listener for every load event.
	pub fn on<F>(&mut self, listener: F) -> &mut Self
	where
		F: FnMut(&Event<'_>) + Send + 'static,
	{
		self.notifier.subscribe(listener);
		self
	}

	pub fn on_data<F>(&mut self, mut listener: F) -> &mut Self
	where
		F: FnMut(&GcodeLine) + Send + 'static,
	{
		self.on(move |event| {
			if let Event::Data(line) = event {
				listener(line);
			}
		})
	}

	pub fn on_progress<F>(&mut self, mut listener: F) -> &mut Self
	where
		F: FnMut(Progress) + Send + 'static,
	{
		self.on(move |event| {
			if let Event::Progress(progress) = event {
				listener(*progress);
			}
		})
	}

	pub fn on_end<F>(&mut self, mut listener: F) -> &mut Self
	where
		F: FnMut(&[GcodeLine]) + Send + 'static,
	{
		self.on(move |event| {
			if let Event::End(results) = event {
				listener(results);
			}
		})
	}

	pub fn on_error<F>(&mut self, mut listener: F) -> &mut Self
	where
		F: FnMut(&LoadError) + Send + 'static,
	{
		self.on(move |event| {
			if let Event::Error(err) = event {
				listener(err);
			}
		})
	}

	pub(crate) fn emit(&mut self, event: Event<'_>) {
		self.notifier.emit(event);
	}
}
