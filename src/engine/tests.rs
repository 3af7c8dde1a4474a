use crate::engine::commands::registry::Registry;
use crate::engine::commands::{Command, CommandSpec, Parameter};
use crate::engine::console::{Console, ConsoleOptions};
use crate::engine::error::{CommandError, Error};
use crate::engine::host::{BufferHost, Host};
use crate::engine::register_builtins;
use crate::engine::value::{Value, ValueKind};

#[derive(Default)]
struct MandatoryNamed {
    message: String,
    flag: bool,
}

impl Command for MandatoryNamed {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Test", "Mandatory")
            .parameter(Parameter::new("Message").mandatory(), |c| &mut c.message)
            .parameter(Parameter::new("Flag"), |c| &mut c.flag);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        Ok(Value::String(format!("{}:{}", self.message, self.flag)))
    }
}

// Takes the piped value through a named-only parameter.
#[derive(Default)]
struct RepeatText {
    input: String,
    count: i32,
}

impl Command for RepeatText {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Repeat", "Text")
            .parameter(Parameter::new("Count").position(0).mandatory(), |c| &mut c.count)
            .parameter(Parameter::new("Input").allow_pipe(), |c| &mut c.input);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        let count = usize::try_from(self.count).map_err(|_| CommandError::new("Count must not be negative"))?;
        Ok(Value::String(self.input.repeat(count)))
    }
}

// Pipe-eligible both by position (text) and by name (number).
#[derive(Default)]
struct DescribeInput {
    text: String,
    count: i32,
}

impl Command for DescribeInput {
    fn describe(spec: &mut CommandSpec<Self>) {
        spec.name("Describe", "Input")
            .parameter(Parameter::new("Text").position(0).allow_pipe(), |c| &mut c.text)
            .parameter(Parameter::new("Count").allow_pipe(), |c| &mut c.count);
    }

    fn process(&mut self, _host: &mut dyn Host) -> Result<Value, CommandError> {
        Ok(Value::String(format!("{}|{}", self.text, self.count)))
    }
}

fn setup() -> (Console, BufferHost) {
    let mut registry = Registry::new();
    register_builtins(&mut registry).unwrap();
    registry.register::<MandatoryNamed>().unwrap();
    registry.register::<RepeatText>().unwrap();
    registry.register::<DescribeInput>().unwrap();
    (Console::new(registry, ConsoleOptions::default()), BufferHost::new())
}

#[test]
fn test_mandatory_named_parameter() {
    let (mut console, mut host) = setup();
    let result = console.evaluate("Test-Mandatory -Message 'hello'", &mut host).unwrap();
    assert_eq!(result, Value::from("hello:false"));

    let err = console.evaluate("Test-Mandatory -Flag", &mut host).unwrap_err();
    assert_eq!(
        err,
        Error::MissingMandatoryParameter {
            command: "Test-Mandatory".into(),
            parameter: "Message".into(),
        }
    );
}

#[test]
fn test_flag_before_named_value() {
    let (mut console, mut host) = setup();
    let result = console.evaluate("test-mandatory -flag -MESSAGE hi", &mut host).unwrap();
    assert_eq!(result, Value::from("hi:true"));
}

#[test]
fn test_flag_does_not_leak_into_next_call() {
    let (mut console, mut host) = setup();
    console.evaluate("Test-Mandatory -Flag -Message a", &mut host).unwrap();
    let result = console.evaluate("Test-Mandatory -Message b", &mut host).unwrap();
    assert_eq!(result, Value::from("b:false"));
}

#[test]
fn test_pipe_into_named_parameter() {
    let (mut console, mut host) = setup();
    let result = console.evaluate("Join-Text 'a' 'b' | Repeat-Text 3", &mut host).unwrap();
    assert_eq!(result, Value::from("ababab"));
}

#[test]
fn test_named_parameter_already_bound_by_pipe() {
    let (mut console, mut host) = setup();
    let err = console
        .evaluate("Join-Text 'a' 'b' | Repeat-Text 2 -Input 'c'", &mut host)
        .unwrap_err();
    assert_eq!(
        err,
        Error::AlreadyBoundByPipe {
            command: "Repeat-Text".into(),
            parameter: "Input".into(),
        }
    );
}

#[test]
fn test_command_error_is_reported() {
    let (mut console, mut host) = setup();
    assert!(console.execute("Repeat-Text -1 -Input 'x'", &mut host).is_err());
    assert_eq!(host.errors, vec!["Count must not be negative".to_string()]);
}

#[test]
fn test_substring() {
    let (mut console, mut host) = setup();
    assert_eq!(
        console.evaluate("Get-Substring 'Hello World' -Index 6", &mut host).unwrap(),
        Value::from("World")
    );
    assert_eq!(
        console.evaluate("Get-Substring 'Hello World' -Index 6 -Length 3", &mut host).unwrap(),
        Value::from("Wor")
    );
}

#[test]
fn test_substring_index_rounds_to_nearest() {
    let (mut console, mut host) = setup();
    assert_eq!(
        console.evaluate("Get-Substring 'Hello World' -Index 5.6", &mut host).unwrap(),
        Value::from("World")
    );
    assert_eq!(
        console.evaluate("Get-Substring 'Hello World' -Index 0.5 -Length 2.5", &mut host).unwrap(),
        Value::from("He")
    );
}

#[test]
fn test_substring_length_out_of_range() {
    let (mut console, mut host) = setup();
    let err = console
        .evaluate("Get-Substring 'Hello World' -Length 9999999999", &mut host)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidArgumentType { ref parameter, expected: ValueKind::I32, .. } if parameter == "Length"
    ));
}

#[test]
fn test_pipe_falls_through_to_named_parameter() {
    let (mut console, mut host) = setup();
    let result = console.evaluate("Add-Number 1 2 | Describe-Input", &mut host).unwrap();
    assert_eq!(result, Value::from("|3"));

    let result = console.evaluate("Add-Number 1 1.5 | Describe-Input 'x'", &mut host).unwrap();
    assert_eq!(result, Value::from("x|2"));
}

#[test]
fn test_pipe_prefers_positional_parameter() {
    let (mut console, mut host) = setup();
    let result = console.evaluate("Join-Text 'a' 'b' | Describe-Input -Count 4", &mut host).unwrap();
    assert_eq!(result, Value::from("ab|4"));
}

#[test]
fn test_pipe_value_fitting_no_parameter() {
    let (mut console, mut host) = setup();
    let err = console
        .evaluate("Add-Number 9999999999 1 | Describe-Input", &mut host)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPipeType { ref command, .. } if command == "Describe-Input"));
}

#[test]
fn test_joined_text_piped_into_substring() {
    let (mut console, mut host) = setup();
    let result = console
        .evaluate("Join-Text 'Hello' 'World' -Separator ' ' | Get-Substring -Index 6", &mut host)
        .unwrap();
    assert_eq!(result, Value::from("World"));
}

#[test]
fn test_four_stage_chain_and_last_result() {
    let (mut console, mut host) = setup();
    let result = console
        .evaluate(
            "Add-Number 3 7 | Multiply-Number 4 | Subtract-Number 20 | Divide-Number 10",
            &mut host,
        )
        .unwrap();
    assert_eq!(result, Value::F64(2.0));
    assert_eq!(console.evaluate("$last", &mut host).unwrap(), Value::F64(2.0));
}

#[test]
fn test_assignment_from_pipe_chain() {
    let (mut console, mut host) = setup();
    console.evaluate("$x = Add-Number 1 2 | Divide-Number 6 -Flip", &mut host).unwrap();
    assert_eq!(console.variables().get("x"), Some(&Value::F64(2.0)));
}

#[test]
fn test_write_host_channels() {
    let (mut console, mut host) = setup();
    assert_eq!(console.evaluate("Write-Host 'out'", &mut host).unwrap(), Value::Null);
    console.evaluate("Write-Host 'dbg' -Debug", &mut host).unwrap();
    console.evaluate("Write-Host 'err' -Error", &mut host).unwrap();

    assert_eq!(host.output, vec!["out".to_string()]);
    assert_eq!(host.debug, vec!["dbg".to_string()]);
    assert_eq!(host.errors, vec!["err".to_string()]);
}

#[test]
fn test_unicode_variable_names() {
    let (mut console, mut host) = setup();
    console.evaluate("$größe = 4", &mut host).unwrap();
    let result = console.evaluate("Multiply-Number $größe 2", &mut host).unwrap();
    assert_eq!(result, Value::F64(8.0));
}

#[test]
fn test_variables_are_case_sensitive() {
    let (mut console, mut host) = setup();
    console.evaluate("$Name = 'a'", &mut host).unwrap();
    assert_eq!(console.evaluate("$name", &mut host).unwrap(), Value::Null);
}
