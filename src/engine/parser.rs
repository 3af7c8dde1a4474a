use crate::engine::ast::{CommandInvocation, ParsedValue};
use crate::engine::error::{Error, Result};

/// Parses one line of console input into a single statement.
///
/// Every rule is tried in a fixed priority order and the first one that
/// matches wins. The alternatives never overlap because each one starts with
/// its own marker (`$`, a quote, a sign or digit, a letter), so the order
/// only matters for rules sharing a prefix such as `$a = ...` and `$a.b`.
pub fn parse_statement(input: &str) -> Result<ParsedValue> {
    if input.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut cursor = Cursor::new(input);
    cursor.skip_ws();
    let statement = cursor.statement();
    cursor.skip_ws();

    match statement {
        Some(value) if cursor.at_end() => Ok(value),
        _ => Err(cursor.incomplete()),
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Runs `rule` and rewinds to the starting position when it fails.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = rule(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    fn incomplete(&self) -> Error {
        Error::IncompleteParse {
            remainder: self.rest().trim_end().to_string(),
            offset: self.src[..self.pos].chars().count(),
        }
    }

    // Statement = Assignment | PipeChain | Reflection | Command | Variable | QuotedString | Number
    fn statement(&mut self) -> Option<ParsedValue> {
        self.attempt(Self::assignment)
            .or_else(|| self.attempt(Self::pipe_chain))
            .or_else(|| self.attempt(Self::reflection))
            .or_else(|| self.attempt(Self::command).map(ParsedValue::Command))
            .or_else(|| self.attempt(Self::variable).map(ParsedValue::VariableRef))
            .or_else(|| self.attempt(Self::quoted_string).map(ParsedValue::String))
            .or_else(|| self.attempt(Self::number).map(ParsedValue::Number))
    }

    // Assignment = Variable '=' (PipeChain | Reflection | Command | Variable | QuotedString | Number)
    fn assignment(&mut self) -> Option<ParsedValue> {
        let name = self.variable()?;
        self.skip_ws();
        if !self.eat('=') {
            return None;
        }
        self.skip_ws();

        let value = self
            .attempt(Self::pipe_chain)
            .or_else(|| self.attempt(Self::reflection))
            .or_else(|| self.attempt(Self::command).map(ParsedValue::Command))
            .or_else(|| self.attempt(Self::variable).map(ParsedValue::VariableRef))
            .or_else(|| self.attempt(Self::quoted_string).map(ParsedValue::String))
            .or_else(|| self.attempt(Self::number).map(ParsedValue::Number))?;

        Some(ParsedValue::Assignment {
            name,
            value: Box::new(value),
        })
    }

    // PipeChain = Command ('|' Command)+
    fn pipe_chain(&mut self) -> Option<ParsedValue> {
        let mut commands = vec![self.command()?];

        loop {
            let next = self.attempt(|c| {
                c.skip_ws();
                if !c.eat('|') {
                    return None;
                }
                c.skip_ws();
                c.command()
            });
            match next {
                Some(command) => commands.push(command),
                None => break,
            }
        }

        if commands.len() < 2 {
            return None;
        }
        Some(ParsedValue::PipeChain(commands))
    }

    // Reflection = Variable ('.' Identifier)+
    fn reflection(&mut self) -> Option<ParsedValue> {
        let variable = self.variable()?;
        let mut members = Vec::new();

        while let Some(member) = self.attempt(|c| {
            c.skip_ws();
            if !c.eat('.') {
                return None;
            }
            c.skip_ws();
            c.identifier()
        }) {
            members.push(member);
        }

        if members.is_empty() {
            return None;
        }
        Some(ParsedValue::Reflection { variable, members })
    }

    // Command = Identifier (Identifier | ParameterFlag | Variable | QuotedString | Number)*
    fn command(&mut self) -> Option<CommandInvocation> {
        let name = self.identifier()?;
        let mut args = Vec::new();

        while let Some(arg) = self.attempt(|c| {
            c.skip_ws();
            c.argument()
        }) {
            args.push(arg);
        }

        Some(CommandInvocation { name, args })
    }

    fn argument(&mut self) -> Option<ParsedValue> {
        self.attempt(Self::identifier)
            .map(ParsedValue::Identifier)
            .or_else(|| self.attempt(Self::parameter_flag).map(ParsedValue::ParameterFlag))
            .or_else(|| self.attempt(Self::variable).map(ParsedValue::VariableRef))
            .or_else(|| self.attempt(Self::quoted_string).map(ParsedValue::String))
            .or_else(|| self.attempt(Self::number).map(ParsedValue::Number))
    }

    // Identifier = (Letter | '_') (Letter | Digit | '_' | '-')*
    fn identifier(&mut self) -> Option<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {
                self.bump();
            }
            _ => return None,
        }
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                self.bump();
            } else {
                break;
            }
        }
        Some(self.src[start..self.pos].to_string())
    }

    // Variable = '$' Identifier
    fn variable(&mut self) -> Option<String> {
        if !self.eat('$') {
            return None;
        }
        self.identifier()
    }

    // ParameterFlag = '-' Identifier
    fn parameter_flag(&mut self) -> Option<String> {
        if !self.eat('-') {
            return None;
        }
        self.identifier()
    }

    // QuotedString = '"' [^"]* '"' | '\'' [^']* '\''
    fn quoted_string(&mut self) -> Option<String> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return None,
        };
        self.bump();
        let start = self.pos;
        let len = self.rest().find(quote)?;
        self.pos = start + len + quote.len_utf8();
        Some(self.src[start..start + len].to_string())
    }

    // Number = '-' Decimal | '+' Decimal | Decimal
    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        if self.peek() == Some('-') || self.peek() == Some('+') {
            self.bump();
        }
        self.decimal()?;
        let text = &self.src[start..self.pos];
        text.parse().ok()
    }

    // Decimal = Digit+ ('.' Digit+)? | '.' Digit+
    fn decimal(&mut self) -> Option<()> {
        let integral = self.digits();
        let has_fraction = self.peek() == Some('.')
            && self.peek_second().is_some_and(|c| c.is_ascii_digit());
        if has_fraction {
            self.bump();
            self.digits();
        }
        if integral == 0 && !has_fraction {
            return None;
        }
        Some(())
    }

    fn digits(&mut self) -> usize {
        let mut count = 0;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            count += 1;
        }
        count
    }
}
