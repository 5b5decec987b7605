use std::{convert::Infallible, fmt, str::FromStr};

use thiserror::Error;


/// Parses a Gcode program into a list of GcodeLines.
/// Blank lines are dropped; every other line (even a comment-only one) produces a GcodeLine so
/// results can be matched back to the source.
pub fn parse(input: &str) -> Result<Vec<GcodeLine>, ParserError> {
	input
		.lines()
		.enumerate()
		.filter_map(|(index, text)| parse_line(text, index + 1).transpose())
		.collect()
}


/// Parses a single source line into its words.
/// Returns `Ok(None)` for a line holding nothing but whitespace.
pub fn parse_line(text: &str, line_num: usize) -> Result<Option<GcodeLine>, ParserError> {
	// Byte-order mark written by some CAM exporters
	let text = if line_num == 1 { text.strip_prefix('\u{feff}').unwrap_or(text) } else { text };

	if text.trim().is_empty() {
		return Ok(None);
	}

	let mut state = ParserState::None;
	let mut words = Vec::new();
	let mut value = String::new();
	let mut chars = text.chars();
	let mut next_char = None;

	loop {
		let c = if let Some(c) = next_char.take() { c } else { chars.next() };

		// Ignore whitespace
		if matches!(c, Some(' ' | '\t' | '\r')) {
			continue;
		}

		match (state, c) {
			(ParserState::None, None) => break,
			(ParserState::None, Some('(')) => state = ParserState::EatingComment,
			// Semicolon comments and checksums run to the end of the line
			(ParserState::None, Some(';' | '*')) => break,
			(ParserState::None, Some('%')) => (),
			(ParserState::None, Some(c)) => {
				let letter = GcodeLetter::try_from(c).map_err(|reason| ParserError::new(reason, line_num))?;
				state = ParserState::ReadingValue(letter);
				value.clear();
			},
			(ParserState::EatingComment, None) => return Err(ParserError::new(ParserErrorReason::ExpectedEndOfComment, line_num)),
			(ParserState::EatingComment, Some(')')) => state = ParserState::None,
			(ParserState::EatingComment, _) => (),
			(ParserState::ReadingValue(_), Some(c)) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') => {
				value.push(c);
			},
			(ParserState::ReadingValue(_), _) if !value.chars().any(|c| c.is_ascii_digit()) => {
				return Err(ParserError::new(ParserErrorReason::ExpectedNumber, line_num));
			},
			(ParserState::ReadingValue(letter), c) => {
				let parsed = value.parse().unwrap_or_else(|never: Infallible| match never {});
				words.push(GcodeWord { letter, value: parsed });
				state = ParserState::None;

				// Process the character we just read
				next_char = Some(c);
			},
		}
	}

	Ok(Some(GcodeLine {
		number: line_num,
		text: text.trim_end().to_string(),
		words,
	}))
}


#[derive(Debug, Error)]
#[error("Parser error: {reason} at line {line}")]
pub struct ParserError {
	reason: ParserErrorReason,
	line: usize,
}

impl ParserError {
	fn new(reason: ParserErrorReason, line: usize) -> Self {
		Self { reason, line }
	}

	pub fn reason(&self) -> &ParserErrorReason {
		&self.reason
	}

	/// 1-based source line the error was found on.
	pub fn line(&self) -> usize {
		self.line
	}
}


#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserErrorReason {
	/// Parser expected a valid Gcode letter, but found something else
	#[error("Expected a valid Gcode letter")]
	ExpectedLetter,
	/// Parser expected a valid Gcode number, but found something else
	#[error("Expected a valid Gcode number")]
	ExpectedNumber,
	#[error("Expected end of comment")]
	ExpectedEndOfComment,
}


#[derive(Copy, Clone)]
enum ParserState {
	None,
	ReadingValue(GcodeLetter),
	EatingComment,
}


/// The value half of a word.
/// Anything that is neither an integer nor a float (e.g. `1.2.3`) is kept as written.
#[derive(Debug, Clone, PartialEq)]
pub enum GcodeValue {
	Int(i64),
	Float(f64),
	Text(String),
}

impl GcodeValue {
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			GcodeValue::Int(i) => Some(*i as f64),
			GcodeValue::Float(f) => Some(*f),
			GcodeValue::Text(_) => None,
		}
	}
}

impl FromStr for GcodeValue {
	type Err = Infallible;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		if let Ok(int) = input.parse() {
			Ok(GcodeValue::Int(int))
		} else if let Ok(float) = input.parse() {
			Ok(GcodeValue::Float(float))
		} else {
			Ok(GcodeValue::Text(input.to_string()))
		}
	}
}

/// Integral floats print without a fraction so `G1.0` and `G01` both name `G1`.
impl fmt::Display for GcodeValue {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			GcodeValue::Int(i) => write!(f, "{}", i),
			GcodeValue::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{}", *x as i64),
			GcodeValue::Float(x) => write!(f, "{}", x),
			GcodeValue::Text(s) => f.write_str(s),
		}
	}
}


#[derive(Debug, Clone, PartialEq)]
pub struct GcodeWord {
	pub letter: GcodeLetter,
	pub value: GcodeValue,
}

impl GcodeWord {
	pub fn new(letter: GcodeLetter, value: GcodeValue) -> Self {
		Self { letter, value }
	}

	/// True for the words that open a command group (`G` and `M`).
	pub fn is_command(&self) -> bool {
		matches!(self.letter, GcodeLetter::G | GcodeLetter::M)
	}
}

impl fmt::Display for GcodeWord {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}{}", self.letter, self.value)
	}
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GcodeLetter {
	A,
	B,
	C,
	D,
	E,
	F,
	G,
	H,
	I,
	J,
	K,
	L,
	M,
	N,
	O,
	P,
	Q,
	R,
	S,
	T,
	U,
	V,
	W,
	X,
	Y,
	Z,
}

impl GcodeLetter {
	pub fn as_char(self) -> char {
		match self {
			GcodeLetter::A => 'A',
			GcodeLetter::B => 'B',
			GcodeLetter::C => 'C',
			GcodeLetter::D => 'D',
			GcodeLetter::E => 'E',
			GcodeLetter::F => 'F',
			GcodeLetter::G => 'G',
			GcodeLetter::H => 'H',
			GcodeLetter::I => 'I',
			GcodeLetter::J => 'J',
			GcodeLetter::K => 'K',
			GcodeLetter::L => 'L',
			GcodeLetter::M => 'M',
			GcodeLetter::N => 'N',
			GcodeLetter::O => 'O',
			GcodeLetter::P => 'P',
			GcodeLetter::Q => 'Q',
			GcodeLetter::R => 'R',
			GcodeLetter::S => 'S',
			GcodeLetter::T => 'T',
			GcodeLetter::U => 'U',
			GcodeLetter::V => 'V',
			GcodeLetter::W => 'W',
			GcodeLetter::X => 'X',
			GcodeLetter::Y => 'Y',
			GcodeLetter::Z => 'Z',
		}
	}
}

impl fmt::Display for GcodeLetter {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.as_char())
	}
}

impl TryFrom<char> for GcodeLetter {
	type Error = ParserErrorReason;

	fn try_from(value: char) -> Result<Self, Self::Error> {
		match value.to_ascii_uppercase() {
			'A' => Ok(GcodeLetter::A),
			'B' => Ok(GcodeLetter::B),
			'C' => Ok(GcodeLetter::C),
			'D' => Ok(GcodeLetter::D),
			'E' => Ok(GcodeLetter::E),
			'F' => Ok(GcodeLetter::F),
			'G' => Ok(GcodeLetter::G),
			'H' => Ok(GcodeLetter::H),
			'I' => Ok(GcodeLetter::I),
			'J' => Ok(GcodeLetter::J),
			'K' => Ok(GcodeLetter::K),
			'L' => Ok(GcodeLetter::L),
			'M' => Ok(GcodeLetter::M),
			'N' => Ok(GcodeLetter::N),
			'O' => Ok(GcodeLetter::O),
			'P' => Ok(GcodeLetter::P),
			'Q' => Ok(GcodeLetter::Q),
			'R' => Ok(GcodeLetter::R),
			'S' => Ok(GcodeLetter::S),
			'T' => Ok(GcodeLetter::T),
			'U' => Ok(GcodeLetter::U),
			'V' => Ok(GcodeLetter::V),
			'W' => Ok(GcodeLetter::W),
			'X' => Ok(GcodeLetter::X),
			'Y' => Ok(GcodeLetter::Y),
			'Z' => Ok(GcodeLetter::Z),
			_ => Err(ParserErrorReason::ExpectedLetter),
		}
	}
}


/// One tokenized source line.
#[derive(Debug, Clone, PartialEq)]
pub struct GcodeLine {
	/// 1-based line number in the source
	pub number: usize,
	/// Source text with trailing whitespace removed
	pub text: String,
	pub words: Vec<GcodeWord>,
}
