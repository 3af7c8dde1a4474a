/// Color roles a host may render output with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKind {
    Default,
    Accented,
    Debug,
    Error,
    Text,
    Number,
}

/// Output capability the console and its commands write through.
///
/// The core never renders anything itself; a terminal, a test buffer or any
/// other front end decides what a write and a color mean.
pub trait Host {
    fn write(&mut self, text: &str);
    fn write_error(&mut self, text: &str);
    fn write_debug(&mut self, text: &str);

    fn supports_color(&self) -> bool;

    /// Marks `text` with `color`. Hosts without color return it unchanged.
    fn format_color(&self, text: &str, color: ColorKind) -> String;
}

/// Host that keeps every line in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferHost {
    pub output: Vec<String>,
    pub errors: Vec<String>,
    pub debug: Vec<String>,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for BufferHost {
    fn write(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn write_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn write_debug(&mut self, text: &str) {
        self.debug.push(text.to_string());
    }

    fn supports_color(&self) -> bool {
        false
    }

    fn format_color(&self, text: &str, _color: ColorKind) -> String {
        text.to_string()
    }
}
