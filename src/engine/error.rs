use thiserror::Error;

use crate::engine::value::ValueKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure raised by a command's own processing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything that can abort a statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    // Grammar
    #[error("Nothing to parse: the input is empty")]
    EmptyInput,
    #[error("Unexpected input at offset {offset}")]
    IncompleteParse { remainder: String, offset: usize },

    // Registration
    #[error("The command type '{type_name}' does not declare a verb and noun")]
    MissingCommandMetadata { type_name: String },
    #[error("A command named '{name}' is already registered")]
    DuplicateCommandName { name: String },
    #[error("Invalid position {position} for parameter '{parameter}' of '{command}'")]
    InvalidPosition {
        command: String,
        parameter: String,
        position: i32,
    },
    #[error("Boolean parameter '{parameter}' of '{command}' cannot be mandatory")]
    InvalidFlagMandatory { command: String, parameter: String },

    // Binding
    #[error("The command '{name}' does not exist")]
    UnknownCommand { name: String },
    #[error("The named parameter '{parameter}' is not recognized by '{command}'")]
    UnknownNamedParameter { command: String, parameter: String },
    #[error("'{command}' accepts {arity} positional arguments; '{argument}' is one too many")]
    UnexpectedPositionalArgument {
        command: String,
        arity: usize,
        argument: String,
    },
    #[error("The named parameter '{parameter}' of '{command}' is missing a value of type {kind}")]
    MissingNamedValue {
        command: String,
        parameter: String,
        kind: ValueKind,
    },
    #[error("Parameter '{parameter}' expects {expected} but received {received}")]
    InvalidArgumentType {
        parameter: String,
        expected: ValueKind,
        received: String,
    },
    #[error("'{command}' has no parameter accepting a piped {received}")]
    InvalidPipeType { command: String, received: String },
    #[error("The parameter '{parameter}' of '{command}' is already bound by the pipe")]
    AlreadyBoundByPipe { command: String, parameter: String },
    #[error("The mandatory parameter '{parameter}' of '{command}' is missing")]
    MissingMandatoryParameter { command: String, parameter: String },

    // Evaluation
    #[error("The variable '{name}' is read-only")]
    ReadOnlyVariable { name: String },

    #[error(transparent)]
    Command(#[from] CommandError),
}
