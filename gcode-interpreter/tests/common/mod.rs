#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gcode_interpreter::{Args, HandlerResult, Handlers, Machine, MethodTable};

pub const MOTION: [&str; 3] = ["G0", "G1", "G2"];
pub const SETUP: [&str; 5] = ["G17", "G20", "G90", "G94", "G54"];

pub fn fixture(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR"))
		.join("tests")
		.join("fixtures")
		.join(name)
}

pub fn read_fixture(name: &str) -> String {
	std::fs::read_to_string(fixture(name)).expect("fixture should be readable")
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter("gcode_interpreter=trace")
		.with_test_writer()
		.try_init();
}

/// Call counts shared between the test and the handlers it registers.
#[derive(Clone, Default)]
pub struct CallCounts(Arc<Mutex<HashMap<String, usize>>>);

impl CallCounts {
	pub fn get(&self, code: &str) -> usize {
		self.0.lock().unwrap().get(code).copied().unwrap_or(0)
	}

	pub fn handlers(&self, codes: &[&str]) -> Handlers {
		let mut handlers = Handlers::new();
		for code in codes {
			let counts = self.clone();
			let key = code.to_string();
			handlers.insert(*code, move |_args: &Args| {
				*counts.0.lock().unwrap().entry(key.clone()).or_default() += 1;
				Ok(())
			});
		}
		handlers
	}
}

/// Counts its own method calls, like a subclass overriding `G0`, `G1`, ...
#[derive(Default)]
pub struct CountingMachine {
	pub calls: HashMap<&'static str, usize>,
	pub arg_sizes: Vec<usize>,
}

impl CountingMachine {
	pub fn get(&self, code: &str) -> usize {
		self.calls.get(code).copied().unwrap_or(0)
	}

	fn bump(&mut self, code: &'static str, args: &Args) -> HandlerResult {
		*self.calls.entry(code).or_default() += 1;
		self.arg_sizes.push(args.len());
		Ok(())
	}
}

impl Machine for CountingMachine {
	fn methods() -> MethodTable<Self> {
		MethodTable::<Self>::new()
			.with("G0", |m, args| m.bump("G0", args))
			.with("G1", |m, args| m.bump("G1", args))
			.with("G2", |m, args| m.bump("G2", args))
			.with("G17", |m, args| m.bump("G17", args))
			.with("G20", |m, args| m.bump("G20", args))
			.with("G90", |m, args| m.bump("G90", args))
			.with("G94", |m, args| m.bump("G94", args))
			.with("G54", |m, args| m.bump("G54", args))
	}
}
