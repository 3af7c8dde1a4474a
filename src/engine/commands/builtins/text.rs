use crate::engine::commands::{Command, CommandSpec, Parameter};
use crate::engine::error::CommandError;
use crate::engine::host::Host;
use crate::engine::value::Value;

/// Characters of `Text` from `Index`, at most `Length` of them (negative
/// length means "to the end").
pub struct GetSubstring {
    text: String,
    index: i32,
    length: i32,
}

impl Default for GetSubstring {
    fn default() -> Self {
        Self {
            text: String::new(),
            index: 0,
            length: -1,
        }
    }
}

impl Command for GetSubstring {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Get", "Substring")
            .parameter(Parameter::new("Text").position(0).mandatory().allow_pipe(), |c| &mut c.text)
            .parameter(Parameter::new("Index"), |c| &mut c.index)
            .parameter(Parameter::new("Length"), |c| &mut c.length);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        let total = self.text.chars().count();
        let start = usize::try_from(self.index)
            .ok()
            .filter(|start| *start <= total)
            .ok_or_else(|| {
                CommandError::new(format!(
                    "Index {} is outside of '{}' ({} characters)",
                    self.index, self.text, total
                ))
            })?;

        let chars = self.text.chars().skip(start);
        let result: String = match usize::try_from(self.length) {
            Ok(length) => chars.take(length).collect(),
            Err(_) => chars.collect(),
        };
        Ok(Value::String(result))
    }
}

/// `A` followed by `B`, joined with `Separator`.
#[derive(Default)]
pub struct JoinText {
    a: String,
    b: String,
    separator: String,
}

impl Command for JoinText {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Join", "Text")
            .parameter(Parameter::new("A").position(0).mandatory().allow_pipe(), |c| &mut c.a)
            .parameter(Parameter::new("B").position(1).mandatory(), |c| &mut c.b)
            .parameter(Parameter::new("Separator"), |c| &mut c.separator);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        Ok(Value::String(format!("{}{}{}", self.a, self.separator, self.b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::host::BufferHost;

    #[test]
    fn test_substring_bounds() {
        let mut host = BufferHost::new();
        let mut cmd = GetSubstring {
            text: "Hello World".into(),
            index: 6,
            ..Default::default()
        };
        assert_eq!(cmd.process(&mut host).unwrap(), Value::from("World"));

        cmd.length = 3;
        assert_eq!(cmd.process(&mut host).unwrap(), Value::from("Wor"));

        cmd.index = 12;
        assert!(cmd.process(&mut host).is_err());

        cmd.index = -1;
        assert!(cmd.process(&mut host).is_err());
    }
}
