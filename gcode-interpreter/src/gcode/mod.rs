mod dispatch;
pub mod interpreter;
mod parser;

pub use dispatch::{Handler, HandlerError, HandlerResult, Handlers, Machine, Method, MethodTable};
pub use interpreter::{group_words, Args, Command, DispatchError, Interpreter, ModalState, Options, DEFAULT_READ_CAPACITY};
pub use parser::{parse, parse_line, GcodeLetter, GcodeLine, GcodeValue, GcodeWord, ParserError, ParserErrorReason};
