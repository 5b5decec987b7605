use std::path::Path;

use crate::error::LoadError;
use crate::gcode::{parse, GcodeLine, Interpreter, Machine};


impl<M: Machine> Interpreter<M> {
	pub fn load_from_file_sync(&mut self, path: impl AsRef<Path>) -> Result<Vec<GcodeLine>, LoadError> {
		self.load_from_file_sync_with(path, |_, _| ())
	}

	/// Reads and interprets a whole file, calling `callback` with each line and its 0-based
	/// index once that line has been dispatched.
	pub fn load_from_file_sync_with<F>(&mut self, path: impl AsRef<Path>, callback: F) -> Result<Vec<GcodeLine>, LoadError>
	where
		F: FnMut(&GcodeLine, usize),
	{
		let path = path.as_ref();
		let bytes = std::fs::read(path).map_err(|source| LoadError::Open {
			path: path.to_path_buf(),
			source,
		})?;

		tracing::debug!(kind = "file", path = %path.display(), bytes = bytes.len(), "loading gcode synchronously");
		self.load_from_string_sync_with(&String::from_utf8_lossy(&bytes), callback)
	}

	pub fn load_from_string_sync(&mut self, text: &str) -> Result<Vec<GcodeLine>, LoadError> {
		self.load_from_string_sync_with(text, |_, _| ())
	}

	/// Like [`Interpreter::load_from_file_sync_with`], for in-memory text.
	/// Nothing is dispatched if any line fails to tokenize.
	pub fn load_from_string_sync_with<F>(&mut self, text: &str, mut callback: F) -> Result<Vec<GcodeLine>, LoadError>
	where
		F: FnMut(&GcodeLine, usize),
	{
		let lines = parse(text)?;
		let mut results = Vec::with_capacity(lines.len());

		for (index, line) in lines.into_iter().enumerate() {
			results.push(line);
			let line = &results[index];
			self.interpret(line)?;
			callback(line, index);
		}

		tracing::debug!(lines = results.len(), "gcode loaded");
		Ok(results)
	}
}
