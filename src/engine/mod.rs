pub mod ast;
pub mod commands;
pub mod console;
pub mod context;
pub mod error;
pub mod executor;
pub mod host;
pub mod parser;
pub mod value;

pub use commands::builtins::register_builtins;
pub use commands::registry::Registry;
pub use commands::{Command, CommandSpec, Parameter};
pub use console::{Console, ConsoleOptions};
pub use error::{CommandError, Error, Result};
pub use host::{BufferHost, ColorKind, Host};
pub use value::{ParamValue, Value, ValueKind};

#[cfg(test)]
mod tests;

/// A console with every stock command registered.
pub fn default_console(options: ConsoleOptions) -> Result<Console> {
    let mut registry = Registry::new();
    register_builtins(&mut registry)?;
    Ok(Console::new(registry, options))
}
