//! Output Emitter
//!
//! Abstraction for output production during printing.

/// Sink for printed text fragments.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);
}

/// String-based emitter for in-memory printing.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the printed output.
    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

impl Emitter for String {
    fn emit(&mut self, text: &str) {
        self.push_str(text);
    }
}

#[cfg(test)]
mod tests;
