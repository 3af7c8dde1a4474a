use log::{debug, warn};

use crate::engine::ast::ParsedValue;
use crate::engine::commands::registry::Registry;
use crate::engine::context::VariableStore;
use crate::engine::error::{Error, Result};
use crate::engine::executor::{execute, execute_chain};
use crate::engine::host::{ColorKind, Host};
use crate::engine::parser::parse_statement;
use crate::engine::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleOptions {
    /// Expose the previous statement's result as a read-only variable.
    pub use_last_result: bool,
    pub last_result_name: String,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            use_last_result: true,
            last_result_name: "last".to_string(),
        }
    }
}

/// One interactive session: the registered commands, the session variables
/// and everything typed so far.
pub struct Console {
    registry: Registry,
    variables: VariableStore,
    history: Vec<String>,
}

impl Console {
    pub fn new(registry: Registry, options: ConsoleOptions) -> Self {
        let variables = if options.use_last_result {
            VariableStore::with_last_result(options.last_result_name)
        } else {
            VariableStore::new()
        };
        Self {
            registry,
            variables,
            history: Vec::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableStore {
        &mut self.variables
    }

    pub fn last_value(&self) -> &Value {
        self.variables.last_result()
    }

    /// The last `count` input lines, oldest first; every line when `count`
    /// is zero.
    pub fn history(&self, count: usize) -> &[String] {
        if count == 0 || count >= self.history.len() {
            &self.history
        } else {
            &self.history[self.history.len() - count..]
        }
    }

    /// Handles one input line end to end: evaluates it and reports the
    /// result, or the error, through `host`.
    pub fn execute(&mut self, input: &str, host: &mut dyn Host) -> Result<Value> {
        let result = self.evaluate(input, host);
        match &result {
            Ok(value) => write_value(value, host),
            Err(err) => {
                warn!("Statement failed: {}", err);
                write_failure(err, host);
            }
        }
        result
    }

    /// Parses and evaluates one input line without reporting anything. The
    /// line is kept in the history even when it fails.
    pub fn evaluate(&mut self, input: &str, host: &mut dyn Host) -> Result<Value> {
        self.history.push(input.to_string());

        let statement = parse_statement(input)?;
        let value = self.evaluate_statement(&statement, host)?;
        self.variables.record_last_result(value.clone());
        Ok(value)
    }

    pub fn evaluate_statement(&mut self, statement: &ParsedValue, host: &mut dyn Host) -> Result<Value> {
        match statement {
            ParsedValue::String(s) | ParsedValue::Identifier(s) => Ok(Value::String(s.clone())),
            ParsedValue::Number(n) => Ok(Value::F64(*n)),
            ParsedValue::VariableRef(name) => Ok(self.variables.get_or_create(name)),
            ParsedValue::Command(invocation) => {
                execute(invocation, &self.registry, &mut self.variables, None, host)
            }
            ParsedValue::PipeChain(chain) => execute_chain(chain, &self.registry, &mut self.variables, host),
            ParsedValue::Assignment { name, value } => {
                if self.variables.is_last_result(name) {
                    return Err(Error::ReadOnlyVariable { name: name.clone() });
                }
                let value = self.evaluate_statement(value, host)?;
                self.variables.assign(name, value.clone())?;
                Ok(value)
            }
            ParsedValue::Reflection { variable, members } => {
                // Member access is recognized by the grammar but has no meaning yet.
                debug!("Reflection on ${} ({}) is not evaluated", variable, members.join("."));
                Ok(Value::Null)
            }
            ParsedValue::ParameterFlag(name) => {
                // Only meaningful as a command argument.
                debug!("Bare flag -{} evaluates to nothing", name);
                Ok(Value::Null)
            }
        }
    }
}

fn write_value(value: &Value, host: &mut dyn Host) {
    let color = match value {
        Value::Null => ColorKind::Accented,
        Value::String(_) => ColorKind::Text,
        Value::Bool(_) => ColorKind::Default,
        _ => ColorKind::Number,
    };
    let text = host.format_color(&value.to_string(), color);
    host.write(&text);
}

fn write_failure(err: &Error, host: &mut dyn Host) {
    let message = match err {
        Error::IncompleteParse { remainder, .. } => {
            let remainder = host.format_color(&format!("Remainder: {}", remainder), ColorKind::Default);
            format!("{}\n{}", err, remainder)
        }
        _ => err.to_string(),
    };
    host.write_error(&message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::commands::builtins::register_builtins;
    use crate::engine::host::BufferHost;

    fn console() -> Console {
        let mut registry = Registry::new();
        register_builtins(&mut registry).unwrap();
        Console::new(registry, ConsoleOptions::default())
    }

    #[test]
    fn test_literals_evaluate_to_themselves() {
        let mut console = console();
        let mut host = BufferHost::new();
        assert_eq!(console.evaluate("'text'", &mut host).unwrap(), Value::from("text"));
        assert_eq!(console.evaluate("-2.5", &mut host).unwrap(), Value::F64(-2.5));
    }

    #[test]
    fn test_assign_variable_to_variable() {
        let mut console = console();
        let mut host = BufferHost::new();
        console.evaluate("$b = 'value'", &mut host).unwrap();
        console.evaluate("$a = $b", &mut host).unwrap();
        assert_eq!(console.variables().get("a"), Some(&Value::from("value")));
    }

    #[test]
    fn test_assign_unset_variable_creates_both() {
        let mut console = console();
        let mut host = BufferHost::new();
        assert_eq!(console.evaluate("$a = $b", &mut host).unwrap(), Value::Null);
        assert!(console.variables().contains("b"));
        assert_eq!(console.variables().get("a"), Some(&Value::Null));
    }

    #[test]
    fn test_last_result_cannot_be_assigned() {
        let mut console = console();
        let mut host = BufferHost::new();
        console.evaluate("42", &mut host).unwrap();

        let err = console.evaluate("$last = 1", &mut host).unwrap_err();
        assert_eq!(err, Error::ReadOnlyVariable { name: "last".into() });
        assert_eq!(console.last_value(), &Value::F64(42.0));
    }

    #[test]
    fn test_last_result_tracks_every_statement() {
        let mut console = console();
        let mut host = BufferHost::new();
        console.evaluate("Add-Number 2 5", &mut host).unwrap();
        assert_eq!(console.evaluate("$last", &mut host).unwrap(), Value::F64(7.0));
        assert_eq!(console.evaluate("Multiply-Number $last 2", &mut host).unwrap(), Value::F64(14.0));
    }

    #[test]
    fn test_custom_last_result_name() {
        let mut registry = Registry::new();
        register_builtins(&mut registry).unwrap();
        let options = ConsoleOptions {
            use_last_result: true,
            last_result_name: "_".into(),
        };
        let mut console = Console::new(registry, options);
        let mut host = BufferHost::new();

        console.evaluate("3", &mut host).unwrap();
        assert_eq!(console.evaluate("$_", &mut host).unwrap(), Value::F64(3.0));
        assert!(console.evaluate("$last = 1", &mut host).is_ok());
    }

    #[test]
    fn test_reflection_is_a_no_op() {
        let mut console = console();
        let mut host = BufferHost::new();
        console.evaluate("$obj = 'x'", &mut host).unwrap();
        assert_eq!(console.evaluate("$obj.Length", &mut host).unwrap(), Value::Null);
    }

    #[test]
    fn test_bare_flag_statement_is_null() {
        let mut console = console();
        let mut host = BufferHost::new();
        let flag = ParsedValue::ParameterFlag("Flip".into());
        assert_eq!(console.evaluate_statement(&flag, &mut host).unwrap(), Value::Null);
        assert!(host.output.is_empty());
    }

    #[test]
    fn test_blank_line_is_recorded() {
        let mut console = console();
        let mut host = BufferHost::new();
        assert!(console.execute("   ", &mut host).is_err());
        assert_eq!(console.history(0), ["   "]);
        assert_eq!(host.errors, vec![Error::EmptyInput.to_string()]);
    }

    #[test]
    fn test_execute_reports_through_host() {
        let mut console = console();
        let mut host = BufferHost::new();

        assert!(console.execute("Add-Number 2 5.0", &mut host).is_ok());
        assert!(console.execute("$nothing", &mut host).is_ok());
        assert!(console.execute("Add-Number 2", &mut host).is_err());
        assert!(console.execute("Add-Number 2 |", &mut host).is_err());

        assert_eq!(host.output, vec!["7".to_string(), "NULL".to_string()]);
        assert_eq!(host.errors.len(), 2);
        assert!(host.errors[0].contains("'B'"));
        assert!(host.errors[1].ends_with("Remainder: |"));
    }

    #[test]
    fn test_failures_keep_history_and_state() {
        let mut console = console();
        let mut host = BufferHost::new();
        console.evaluate("$a = 1", &mut host).unwrap();
        assert!(console.evaluate("$a = Missing-Command", &mut host).is_err());
        assert!(console.evaluate("", &mut host).is_err());

        assert_eq!(console.variables().get("a"), Some(&Value::F64(1.0)));
        assert_eq!(console.last_value(), &Value::F64(1.0));
        assert_eq!(console.history(0), ["$a = 1", "$a = Missing-Command", ""]);
        assert_eq!(console.history(1), [""]);
    }
}
