//! Load lifecycle notifications.
//!
//! A streaming load emits one `Data` per line and `Progress` as the source is consumed, then
//! exactly one of `End` or `Error`. Blocking loads emit nothing.

use crate::error::LoadError;
use crate::gcode::GcodeLine;


/// Bytes consumed so far out of `total`; `total` is 0 when the source size is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
	pub current: u64,
	pub total: u64,
}


#[derive(Debug)]
pub enum Event<'a> {
	Data(&'a GcodeLine),
	Progress(Progress),
	End(&'a [GcodeLine]),
	Error(&'a LoadError),
}


type Listener = Box<dyn FnMut(&Event<'_>) + Send>;

/// Listeners in registration order.
#[derive(Default)]
pub(crate) struct Notifier {
	listeners: Vec<Listener>,
}

impl Notifier {
	pub(crate) fn subscribe<F>(&mut self, listener: F)
	where
		F: FnMut(&Event<'_>) + Send + 'static,
	{
		self.listeners.push(Box::new(listener));
	}

	pub(crate) fn emit(&mut self, event: Event<'_>) {
		for listener in &mut self.listeners {
			listener(&event);
		}
	}
}
