//! A tracing layer that records events for assertions.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Captures `"[LEVEL] message"` lines for every event.
#[derive(Clone, Default)]
pub struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl LogCapture {
	/// Installs the capture as the thread's default subscriber.
	pub fn install(&self) -> tracing::subscriber::DefaultGuard {
		tracing_subscriber::registry().with(self.clone()).set_default()
	}

	/// Returns the captured lines.
	pub fn lines(&self) -> Vec<String> {
		self.logs.lock().unwrap().clone()
	}

	/// Returns true if a line at `level` contains `needle`.
	pub fn contains(&self, level: &str, needle: &str) -> bool {
		self.lines()
			.iter()
			.any(|line| line.starts_with(&format!("[{}]", level)) && line.contains(needle))
	}
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(
		&self,
		event: &tracing::Event<'_>,
		_ctx: tracing_subscriber::layer::Context<'_, S>,
	) {
		#[derive(Default)]
		struct MessageVisitor {
			message: String,
			fields: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(
				&mut self,
				field: &tracing::field::Field,
				value: &dyn std::fmt::Debug,
			) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				} else {
					self.fields.push_str(&format!(" {}={:?}", field.name(), value));
				}
			}
		}

		let mut visitor = MessageVisitor::default();
		event.record(&mut visitor);

		self.logs.lock().unwrap().push(format!(
			"[{}] {}{}",
			event.metadata().level(),
			visitor.message,
			visitor.fields
		));
	}
}
