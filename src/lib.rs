//! `vnsh` is a small interactive command language in the verb-noun style.
//!
//! A line is parsed into a statement (a literal, a variable read, an
//! assignment, a command invocation or a pipe chain), arguments are bound to
//! the typed parameters each command declares, and the command runs against
//! a [`engine::Host`] that owns all rendering.
//!
//! ```
//! use vnsh::engine::{default_console, BufferHost, ConsoleOptions, Value};
//!
//! let mut console = default_console(ConsoleOptions::default()).unwrap();
//! let mut host = BufferHost::new();
//! let value = console.evaluate("Add-Number 2 5 | Multiply-Number 3", &mut host).unwrap();
//! assert_eq!(value, Value::F64(21.0));
//! ```

pub mod engine;
