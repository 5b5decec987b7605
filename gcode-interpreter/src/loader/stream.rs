use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::LoadError;
use crate::events::{Event, Progress};
use crate::gcode::{parse_line, GcodeLine, Interpreter, Machine};


impl<M: Machine> Interpreter<M> {
	/// Interprets everything `source` yields.
	///
	/// Each line is announced, recorded and dispatched before the next one is read. Source and
	/// tokenizer failures are reported to `error` listeners and returned; a failing handler
	/// aborts the load and is returned without any notification.
	pub async fn load_from_stream<R>(&mut self, source: impl Into<Option<R>>) -> Result<Vec<GcodeLine>, LoadError>
	where
		R: AsyncRead + Unpin,
	{
		let Some(source) = source.into() else {
			return Err(self.fail(LoadError::MissingSource));
		};

		tracing::debug!(kind = "stream", "loading gcode");
		self.pump(source, 0).await
	}

	/// Interprets a file. A missing path is treated as an empty one and fails to open.
	pub async fn load_from_file<P>(&mut self, path: impl Into<Option<P>>) -> Result<Vec<GcodeLine>, LoadError>
	where
		P: AsRef<Path>,
	{
		let path = path.into().map(|p| p.as_ref().to_path_buf()).unwrap_or_default();

		let file = match tokio::fs::File::open(&path).await {
			Ok(file) => file,
			Err(source) => return Err(self.fail(LoadError::Open { path, source })),
		};
		let total = file.metadata().await.map(|m| m.len()).unwrap_or(0);

		tracing::debug!(kind = "file", path = %path.display(), bytes = total, "loading gcode");
		self.pump(file, total).await
	}

	/// Interprets in-memory text. A missing text is treated as an empty program.
	pub async fn load_from_string<'a>(&mut self, text: impl Into<Option<&'a str>>) -> Result<Vec<GcodeLine>, LoadError> {
		let text = text.into().unwrap_or_default();

		tracing::debug!(kind = "string", bytes = text.len(), "loading gcode");
		self.pump(text.as_bytes(), text.len() as u64).await
	}

	async fn pump<R>(&mut self, source: R, total: u64) -> Result<Vec<GcodeLine>, LoadError>
	where
		R: AsyncRead + Unpin,
	{
		let mut reader = BufReader::with_capacity(self.read_capacity, source);
		let mut results = Vec::new();
		let mut buf = Vec::new();
		let mut current = 0u64;
		let mut line_num = 0;

		loop {
			buf.clear();
			let n = match reader.read_until(b'\n', &mut buf).await {
				Ok(n) => n,
				Err(e) => return Err(self.fail(LoadError::Read(e))),
			};
			if n == 0 {
				break;
			}
			current += n as u64;
			line_num += 1;

			trim_newline(&mut buf);
			let text = String::from_utf8_lossy(&buf);
			match parse_line(&text, line_num) {
				Ok(Some(line)) => {
					self.emit(Event::Data(&line));
					results.push(line);
					if let Some(line) = results.last() {
						self.interpret(line)?;
					}
				},
				Ok(None) => (),
				Err(e) => return Err(self.fail(e.into())),
			}

			self.emit(Event::Progress(Progress { current, total }));
		}

		tracing::debug!(lines = results.len(), "gcode loaded");
		self.emit(Event::End(&results));
		Ok(results)
	}

	fn fail(&mut self, err: LoadError) -> LoadError {
		tracing::warn!(error = %err, "gcode load failed");
		self.emit(Event::Error(&err));
		err
	}
}


fn trim_newline(buf: &mut Vec<u8>) {
	if buf.last() == Some(&b'\n') {
		buf.pop();
	}
	if buf.last() == Some(&b'\r') {
		buf.pop();
	}
}

