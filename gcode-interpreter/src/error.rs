use std::path::PathBuf;

use thiserror::Error;

use crate::gcode::{DispatchError, ParserError};


#[derive(Error, Debug)]
pub enum LoadError {
	#[error("no input source given")]
	MissingSource,
	#[error("cannot open {}: {source}", path.display())]
	Open {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("read error: {0}")]
	Read(#[source] std::io::Error),
	#[error(transparent)]
	Parse(#[from] ParserError),
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
}

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The input could not be opened or read
	Source,
	/// A line could not be tokenized
	Tokenize,
	/// A handler or machine method failed
	Dispatch,
}

impl LoadError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::MissingSource | Self::Open { .. } | Self::Read(_) => ErrorKind::Source,
			Self::Parse(_) => ErrorKind::Tokenize,
			Self::Dispatch(_) => ErrorKind::Dispatch,
		}
	}
}
