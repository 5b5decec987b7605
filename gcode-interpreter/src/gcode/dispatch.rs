use std::{collections::HashMap, fmt};

use super::interpreter::{Args, Command};


/// Error raised by a handler or machine method.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

pub type HandlerResult = Result<(), HandlerError>;

/// A caller-supplied callback, keyed by command code in [`Handlers`].
pub type Handler = Box<dyn FnMut(&Args) -> HandlerResult + Send>;

/// A method on a [`Machine`], keyed by command code in a [`MethodTable`].
pub type Method<M> = fn(&mut M, &Args) -> HandlerResult;


/// Table of caller-supplied handlers, consulted before the machine's own methods.
#[derive(Default)]
pub struct Handlers {
	table: HashMap<String, Handler>,
}

impl Handlers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `handler` for `code` (e.g. `"G1"`), replacing any previous one.
	pub fn with<F>(mut self, code: impl Into<String>, handler: F) -> Self
	where
		F: FnMut(&Args) -> HandlerResult + Send + 'static,
	{
		self.insert(code, handler);
		self
	}

	pub fn insert<F>(&mut self, code: impl Into<String>, handler: F)
	where
		F: FnMut(&Args) -> HandlerResult + Send + 'static,
	{
		self.table.insert(code.into(), Box::new(handler));
	}

	pub fn contains(&self, code: &str) -> bool {
		self.table.contains_key(code)
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	fn get_mut(&mut self, code: &str) -> Option<&mut Handler> {
		self.table.get_mut(code)
	}
}

impl fmt::Debug for Handlers {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut codes: Vec<_> = self.table.keys().collect();
		codes.sort();
		f.debug_struct("Handlers").field("codes", &codes).finish()
	}
}


/// Command code to method lookup for a [`Machine`].
pub struct MethodTable<M> {
	table: HashMap<String, Method<M>>,
}

impl<M> MethodTable<M> {
	pub fn new() -> Self {
		Self { table: HashMap::new() }
	}

	pub fn with(mut self, code: impl Into<String>, method: Method<M>) -> Self {
		self.table.insert(code.into(), method);
		self
	}

	pub fn contains(&self, code: &str) -> bool {
		self.table.contains_key(code)
	}

	fn get(&self, code: &str) -> Option<Method<M>> {
		self.table.get(code).copied()
	}
}

impl<M> Default for MethodTable<M> {
	fn default() -> Self {
		Self::new()
	}
}


/// A machine reacts to resolved commands through its own methods.
///
/// ```
/// use gcode_interpreter::{Args, HandlerResult, Machine, MethodTable};
///
/// #[derive(Default)]
/// struct Plotter {
/// 	moves: usize,
/// }
///
/// impl Plotter {
/// 	fn linear(&mut self, _args: &Args) -> HandlerResult {
/// 		self.moves += 1;
/// 		Ok(())
/// 	}
/// }
///
/// impl Machine for Plotter {
/// 	fn methods() -> MethodTable<Self> {
/// 		MethodTable::new().with("G1", Self::linear)
/// 	}
/// }
/// ```
pub trait Machine: Sized {
	fn methods() -> MethodTable<Self> {
		MethodTable::new()
	}
}

/// The machine without methods; only the handler table fires.
impl Machine for () {}


/// Routes a resolved command to the handler table, then to the machine.
pub(crate) struct Dispatcher<M> {
	pub(crate) machine: M,
	methods: MethodTable<M>,
	handlers: Handlers,
}

impl<M: Machine> Dispatcher<M> {
	pub(crate) fn new(machine: M, handlers: Handlers) -> Self {
		Self {
			machine,
			methods: M::methods(),
			handlers,
		}
	}

	/// Errors are returned as soon as one callback fails; nothing after it runs.
	pub(crate) fn dispatch(&mut self, command: &Command) -> HandlerResult {
		if let Some(handler) = self.handlers.get_mut(&command.code) {
			handler(&command.args)?;
		}

		if let Some(method) = self.methods.get(&command.code) {
			method(&mut self.machine, &command.args)?;
		}

		Ok(())
	}
}
