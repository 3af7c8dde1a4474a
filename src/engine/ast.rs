/// One parsed statement or command argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    // Bare word: "Get-Item"
    Identifier(String),
    // Quoted text: "hello" or 'hello'
    String(String),
    // Decimal literal: -3.14
    Number(f64),
    // $name
    VariableRef(String),
    // -Name
    ParameterFlag(String),
    // Add-Number 1 2
    Command(CommandInvocation),
    // Add-Number 1 2 | Multiply-Number 3
    PipeChain(Vec<CommandInvocation>),
    // $a = <value>
    Assignment {
        name: String,
        value: Box<ParsedValue>,
    },
    // $obj.Member.Inner
    Reflection {
        variable: String,
        members: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<ParsedValue>,
}

impl CommandInvocation {
    pub fn new(name: impl Into<String>, args: Vec<ParsedValue>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}
