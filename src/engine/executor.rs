use log::{debug, trace};

use crate::engine::ast::{CommandInvocation, ParsedValue};
use crate::engine::commands::registry::{CommandDescriptor, ParameterDescriptor, Registry};
use crate::engine::context::VariableStore;
use crate::engine::error::{Error, Result};
use crate::engine::host::Host;
use crate::engine::value::Value;

/// Binds `invocation`'s arguments (and an optional piped value) to the
/// parameters of the command it names, then runs the command.
///
/// Binding completes before the command is built, so a binding failure
/// never reaches the command's `process`.
pub fn execute(
    invocation: &CommandInvocation,
    registry: &Registry,
    variables: &mut VariableStore,
    pipe: Option<Value>,
    host: &mut dyn Host,
) -> Result<Value> {
    let entry = registry.resolve(&invocation.name)?;
    let descriptor = entry.descriptor();
    debug!("Executing {} with {} argument(s)", descriptor.display_name(), invocation.args.len());

    let slots = bind(descriptor, &invocation.args, variables, pipe)?;
    Ok(entry.invoke(slots, host)?)
}

/// Runs every command of a pipe chain, feeding each result into the next
/// command as its piped value. The first failure aborts the chain.
pub fn execute_chain(
    chain: &[CommandInvocation],
    registry: &Registry,
    variables: &mut VariableStore,
    host: &mut dyn Host,
) -> Result<Value> {
    let mut piped = None;
    for invocation in chain {
        let result = execute(invocation, registry, variables, piped.take(), host)?;
        piped = Some(result);
    }
    Ok(piped.unwrap_or_default())
}

/// Resolves arguments into parameter slots, indexed by
/// [`ParameterDescriptor::slot`]. Slots start from the captured defaults so
/// nothing leaks between invocations.
pub fn bind(
    descriptor: &CommandDescriptor,
    args: &[ParsedValue],
    variables: &mut VariableStore,
    pipe: Option<Value>,
) -> Result<Vec<Value>> {
    let command = descriptor.display_name();
    let mut slots = descriptor.default_slots();
    let mut unmet: Vec<&ParameterDescriptor> = descriptor.parameters().filter(|p| p.mandatory).collect();
    let mut pipe_slot = None;

    if let Some(value) = pipe {
        let (param, coerced) = descriptor
            .parameters()
            .filter(|p| p.allow_pipe)
            .find_map(|p| value.coerce(p.kind).map(|v| (p, v)))
            .ok_or_else(|| Error::InvalidPipeType {
                command: command.clone(),
                received: describe(&value),
            })?;
        debug!("Piped {} into {}.{}", describe(&value), command, param.name);
        slots[param.slot] = coerced;
        pipe_slot = Some(param.slot);
        unmet.retain(|p| p.slot != param.slot);
    }

    let mut cursor = 0;
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        let (param, value) = match arg {
            ParsedValue::ParameterFlag(flag) => {
                let param = descriptor.find_named(flag).ok_or_else(|| Error::UnknownNamedParameter {
                    command: command.clone(),
                    parameter: flag.clone(),
                })?;
                if pipe_slot == Some(param.slot) {
                    return Err(Error::AlreadyBoundByPipe {
                        command: command.clone(),
                        parameter: param.name.clone(),
                    });
                }

                if param.is_flag() {
                    (param, Value::Bool(true))
                } else {
                    let next = match args.next() {
                        Some(ParsedValue::ParameterFlag(_)) | None => {
                            return Err(Error::MissingNamedValue {
                                command: command.clone(),
                                parameter: param.name.clone(),
                                kind: param.kind,
                            });
                        }
                        Some(next) => next,
                    };
                    (param, resolve_argument(next, param, variables)?)
                }
            }
            _ => {
                while descriptor
                    .positional
                    .get(cursor)
                    .is_some_and(|p| pipe_slot == Some(p.slot))
                {
                    cursor += 1;
                }
                let param = descriptor.positional.get(cursor).ok_or_else(|| {
                    Error::UnexpectedPositionalArgument {
                        command: command.clone(),
                        arity: descriptor.positional.len(),
                        argument: render_argument(arg),
                    }
                })?;
                cursor += 1;
                (param, resolve_argument(arg, param, variables)?)
            }
        };

        trace!("{}.{} = {:?}", command, param.name, value);
        slots[param.slot] = value;
        unmet.retain(|p| p.slot != param.slot);
    }

    if let Some(param) = unmet.first() {
        return Err(Error::MissingMandatoryParameter {
            command,
            parameter: param.name.clone(),
        });
    }

    Ok(slots)
}

// Turns one argument token into a value of the parameter's kind.
fn resolve_argument(
    arg: &ParsedValue,
    param: &ParameterDescriptor,
    variables: &mut VariableStore,
) -> Result<Value> {
    let value = match arg {
        ParsedValue::Identifier(s) | ParsedValue::String(s) => Value::String(s.clone()),
        ParsedValue::Number(n) => Value::F64(*n),
        ParsedValue::VariableRef(name) => variables.get_or_create(name),
        other => {
            return Err(Error::InvalidArgumentType {
                parameter: param.name.clone(),
                expected: param.kind,
                received: render_argument(other),
            });
        }
    };

    value.coerce(param.kind).ok_or_else(|| Error::InvalidArgumentType {
        parameter: param.name.clone(),
        expected: param.kind,
        received: describe(&value),
    })
}

fn describe(value: &Value) -> String {
    match value.kind() {
        Some(kind) => format!("{} '{}'", kind, value),
        None => "NULL".to_string(),
    }
}

fn render_argument(arg: &ParsedValue) -> String {
    match arg {
        ParsedValue::Identifier(s) | ParsedValue::String(s) => s.clone(),
        ParsedValue::Number(n) => n.to_string(),
        ParsedValue::VariableRef(name) => format!("${}", name),
        ParsedValue::ParameterFlag(name) => format!("-{}", name),
        ParsedValue::Command(invocation) => invocation.name.clone(),
        ParsedValue::PipeChain(_) => "pipe chain".to_string(),
        ParsedValue::Assignment { name, .. } => format!("${} = ...", name),
        ParsedValue::Reflection { variable, members } => format!("${}.{}", variable, members.join(".")),
    }
}
