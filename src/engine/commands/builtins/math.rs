// Arithmetic over doubles. `A` accepts the piped value so chains like
// `Add-Number 3 7 | Multiply-Number 4` feed the previous result forward.

use crate::engine::commands::{Command, CommandSpec, Parameter};
use crate::engine::error::CommandError;
use crate::engine::host::Host;
use crate::engine::value::Value;

#[derive(Default)]
pub struct AddNumber {
    a: f64,
    b: f64,
}

impl Command for AddNumber {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Add", "Number")
            .parameter(Parameter::new("A").position(0).mandatory().allow_pipe(), |c| &mut c.a)
            .parameter(Parameter::new("B").position(1).mandatory(), |c| &mut c.b);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        Ok(Value::F64(self.a + self.b))
    }
}

#[derive(Default)]
pub struct SubtractNumber {
    a: f64,
    b: f64,
}

impl Command for SubtractNumber {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Subtract", "Number")
            .parameter(Parameter::new("A").position(0).mandatory().allow_pipe(), |c| &mut c.a)
            .parameter(Parameter::new("B").position(1).mandatory(), |c| &mut c.b);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        Ok(Value::F64(self.a - self.b))
    }
}

#[derive(Default)]
pub struct MultiplyNumber {
    a: f64,
    b: f64,
}

impl Command for MultiplyNumber {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Multiply", "Number")
            .parameter(Parameter::new("A").position(0).allow_pipe(), |c| &mut c.a)
            .parameter(Parameter::new("B").position(1), |c| &mut c.b);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        Ok(Value::F64(self.a * self.b))
    }
}

/// `A / B`, or `B / A` with `-Flip`.
#[derive(Default)]
pub struct DivideNumber {
    a: f64,
    b: f64,
    flip: bool,
}

impl Command for DivideNumber {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Divide", "Number")
            .parameter(Parameter::new("A").position(0).allow_pipe(), |c| &mut c.a)
            .parameter(Parameter::new("B").position(1), |c| &mut c.b)
            .parameter(Parameter::new("Flip"), |c| &mut c.flip);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        let (dividend, divisor) = if self.flip { (self.b, self.a) } else { (self.a, self.b) };
        Ok(Value::F64(dividend / divisor))
    }
}
