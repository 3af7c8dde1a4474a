use crate::engine::commands::{Command, CommandSpec, Parameter};
use crate::engine::error::CommandError;
use crate::engine::host::{ColorKind, Host};
use crate::engine::value::Value;

/// Writes `Message` through the host; `-Debug` and `-Error` pick the channel.
#[derive(Default)]
pub struct WriteHost {
    message: String,
    debug: bool,
    error: bool,
}

impl Command for WriteHost {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Write", "Host")
            .parameter(Parameter::new("Message").position(0).mandatory().allow_pipe(), |c| &mut c.message)
            .parameter(Parameter::new("Debug"), |c| &mut c.debug)
            .parameter(Parameter::new("Error"), |c| &mut c.error);
    }

    fn process(&mut self, host: &mut dyn Host) -> Result<Value, CommandError> {
        if self.error {
            host.write_error(&self.message);
        } else if self.debug {
            host.write_debug(&self.message);
        } else {
            let text = host.format_color(&self.message, ColorKind::Text);
            host.write(&text);
        }
        Ok(Value::Null)
    }
}
