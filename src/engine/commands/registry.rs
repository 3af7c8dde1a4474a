use std::collections::BTreeMap;

use log::debug;

use crate::engine::commands::{Command, CommandSpec, Field};
use crate::engine::error::{CommandError, Error, Result};
use crate::engine::host::Host;
use crate::engine::value::{Value, ValueKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub position: i32,
    pub mandatory: bool,
    pub allow_pipe: bool,
    pub kind: ValueKind,
    /// Value the slot is reset to before every binding pass.
    pub default: Value,
    /// Index of this parameter's slot, in declaration order.
    pub slot: usize,
}

impl ParameterDescriptor {
    pub fn is_positional(&self) -> bool {
        self.position >= 0
    }

    pub fn is_flag(&self) -> bool {
        self.kind == ValueKind::Bool
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandDescriptor {
    pub verb: String,
    pub noun: String,
    /// `VERB-NOUN`, the registry key.
    pub canonical_name: String,
    /// Sorted by position; positions are exactly `0..positional.len()`.
    pub positional: Vec<ParameterDescriptor>,
    pub named: Vec<ParameterDescriptor>,
}

impl CommandDescriptor {
    /// `Verb-Noun` as declared.
    pub fn display_name(&self) -> String {
        format!("{}-{}", self.verb, self.noun)
    }

    pub fn slot_count(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Fresh parameter slots holding each parameter's captured default.
    pub fn default_slots(&self) -> Vec<Value> {
        let mut slots = vec![Value::Null; self.slot_count()];
        for param in self.parameters() {
            slots[param.slot] = param.default.clone();
        }
        slots
    }

    /// Positional parameters first, then named, each in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.positional.iter().chain(self.named.iter())
    }

    pub fn find_named(&self, name: &str) -> Option<&ParameterDescriptor> {
        let wanted = name.to_lowercase();
        self.named.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    /// One-line usage, e.g. `Divide-Number [<A:f64>] [<B:f64>] [-Flip]`.
    pub fn syntax(&self) -> String {
        let mut parts = vec![self.display_name()];
        for param in &self.positional {
            let slot = format!("<{}:{}>", param.name, param.kind);
            parts.push(if param.mandatory { slot } else { format!("[{}]", slot) });
        }
        for param in &self.named {
            let slot = if param.is_flag() {
                format!("-{}", param.name)
            } else {
                format!("-{} <{}>", param.name, param.kind)
            };
            parts.push(if param.mandatory { slot } else { format!("[{}]", slot) });
        }
        parts.join(" ")
    }
}

/// A registered command: its descriptor plus the means to run it.
pub trait CommandEntry {
    fn descriptor(&self) -> &CommandDescriptor;

    /// Builds a fresh command, applies `slots` (indexed by
    /// [`ParameterDescriptor::slot`]) and processes it.
    fn invoke(&self, slots: Vec<Value>, host: &mut dyn Host) -> std::result::Result<Value, CommandError>;
}

struct Registered<T> {
    descriptor: CommandDescriptor,
    fields: Vec<Field<T>>,
}

impl<T: Command> CommandEntry for Registered<T> {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    fn invoke(&self, slots: Vec<Value>, host: &mut dyn Host) -> std::result::Result<Value, CommandError> {
        let mut command = T::default();
        for (field, value) in self.fields.iter().zip(slots) {
            (field.set)(&mut command, value);
        }
        command.process(host)
    }
}

/// All commands available to a console, keyed case-insensitively by
/// canonical name.
#[derive(Default)]
pub struct Registry {
    commands: BTreeMap<String, Box<dyn CommandEntry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Command>(&mut self) -> Result<&CommandDescriptor> {
        let mut spec = CommandSpec::<T>::new();
        T::describe(&mut spec);

        let (verb, noun) = match (spec.verb.take(), spec.noun.take()) {
            (Some(verb), Some(noun)) if !verb.trim().is_empty() && !noun.trim().is_empty() => (verb, noun),
            _ => {
                return Err(Error::MissingCommandMetadata {
                    type_name: std::any::type_name::<T>().to_string(),
                });
            }
        };

        let canonical_name = format!("{}-{}", verb.to_uppercase(), noun.to_uppercase());
        if self.commands.contains_key(&canonical_name) {
            return Err(Error::DuplicateCommandName {
                name: format!("{}-{}", verb, noun),
            });
        }

        let mut prototype = T::default();
        let mut positional = Vec::new();
        let mut named = Vec::new();
        let mut fields = Vec::with_capacity(spec.params.len());

        for (slot, (param, field)) in spec.params.into_iter().enumerate() {
            let descriptor = ParameterDescriptor {
                default: (field.get)(&mut prototype),
                kind: field.kind,
                name: param.name,
                position: param.position,
                mandatory: param.mandatory,
                allow_pipe: param.allow_pipe,
                slot,
            };
            if descriptor.is_positional() {
                positional.push(descriptor);
            } else {
                named.push(descriptor);
            }
            fields.push(field);
        }
        positional.sort_by_key(|p| p.position);

        let display_name = format!("{}-{}", verb, noun);
        validate_positions(&display_name, &positional)?;
        validate_flags(&display_name, positional.iter().chain(named.iter()))?;

        debug!(
            "Registered {} ({} positional, {} named)",
            display_name,
            positional.len(),
            named.len()
        );

        let entry = Registered {
            descriptor: CommandDescriptor {
                verb,
                noun,
                canonical_name: canonical_name.clone(),
                positional,
                named,
            },
            fields,
        };
        let entry = self.commands.entry(canonical_name).or_insert(Box::new(entry));
        Ok(entry.descriptor())
    }

    pub fn resolve(&self, name: &str) -> Result<&dyn CommandEntry> {
        self.commands
            .get(&name.to_uppercase())
            .map(|entry| entry.as_ref())
            .ok_or_else(|| Error::UnknownCommand {
                name: name.to_string(),
            })
    }

    pub fn descriptor(&self, name: &str) -> Result<&CommandDescriptor> {
        self.resolve(name).map(|entry| entry.descriptor())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Descriptors ordered by canonical name.
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values().map(|entry| entry.descriptor())
    }
}

// Positions must run 0, 1, 2, ... without gaps or repeats.
fn validate_positions(command: &str, positional: &[ParameterDescriptor]) -> Result<()> {
    for (expected, param) in positional.iter().enumerate() {
        if param.position != expected as i32 {
            return Err(Error::InvalidPosition {
                command: command.to_string(),
                parameter: param.name.clone(),
                position: param.position,
            });
        }
    }
    Ok(())
}

// A flag is true by its mere presence, so a mandatory one could never be false.
fn validate_flags<'a>(command: &str, params: impl Iterator<Item = &'a ParameterDescriptor>) -> Result<()> {
    for param in params {
        if param.is_flag() && param.mandatory {
            return Err(Error::InvalidFlagMandatory {
                command: command.to_string(),
                parameter: param.name.clone(),
            });
        }
    }
    Ok(())
}
