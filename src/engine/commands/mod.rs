pub mod builtins;
pub mod registry;

use crate::engine::error::CommandError;
use crate::engine::host::Host;
use crate::engine::value::{ParamValue, Value, ValueKind};

/// A console command.
///
/// `describe` declares the command's verb, noun and parameters once, at
/// registration. Every invocation starts from `Default::default()`, receives
/// its bound parameters through the declared field accessors and then runs
/// `process`.
pub trait Command: Default + 'static {
    fn describe(spec: &mut CommandSpec<Self>);

    fn process(&mut self, host: &mut dyn Host) -> Result<Value, CommandError>;
}

/// Binding attributes of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// `>= 0` for positional parameters, negative for named-only ones.
    pub position: i32,
    pub mandatory: bool,
    pub allow_pipe: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: -1,
            mandatory: false,
            allow_pipe: false,
        }
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn allow_pipe(mut self) -> Self {
        self.allow_pipe = true;
        self
    }
}

/// Type-erased getter/setter pair for one parameter field of `T`.
pub(crate) struct Field<T> {
    pub kind: ValueKind,
    pub get: Box<dyn Fn(&mut T) -> Value>,
    pub set: Box<dyn Fn(&mut T, Value)>,
}

/// Declaration collected from [`Command::describe`].
pub struct CommandSpec<T> {
    pub(crate) verb: Option<String>,
    pub(crate) noun: Option<String>,
    pub(crate) params: Vec<(Parameter, Field<T>)>,
}

impl<T: 'static> CommandSpec<T> {
    pub(crate) fn new() -> Self {
        Self {
            verb: None,
            noun: None,
            params: Vec::new(),
        }
    }

    pub fn name(&mut self, verb: impl Into<String>, noun: impl Into<String>) -> &mut Self {
        self.verb = Some(verb.into());
        self.noun = Some(noun.into());
        self
    }

    /// Declares a parameter backed by the field `access` points at. The
    /// parameter's kind comes from the field type.
    pub fn parameter<F, A>(&mut self, param: Parameter, access: A) -> &mut Self
    where
        F: ParamValue,
        A: Fn(&mut T) -> &mut F + Copy + 'static,
    {
        let field = Field {
            kind: F::KIND,
            get: Box::new(move |target: &mut T| access(target).clone().into_value()),
            set: Box::new(move |target: &mut T, value: Value| {
                if let Some(v) = F::from_value(value) {
                    *access(target) = v;
                }
            }),
        };
        self.params.push((param, field));
        self
    }
}
