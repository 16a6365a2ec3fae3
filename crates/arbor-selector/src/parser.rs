//! Selector parser
//!
//! Single-pass scanner over the selector string. The grammar is the subset
//! the matcher supports: groups, descendant combinators, and compound
//! simple selectors.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::selector::{AttributeMatcher, AttributeSelector, Component, Compound, Selector, SelectorList};
use crate::SelectorError;

/// Parse a selector group
pub(crate) fn parse(input: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = Parser::new(input);
    let mut selectors = Vec::new();

    loop {
        selectors.push(parser.parse_selector()?);
        parser.skip_whitespace();
        match parser.peek() {
            Some((_, ',')) => {
                parser.bump();
            }
            Some((pos, ch)) => return Err(SelectorError::UnexpectedChar { ch, pos }),
            None => break,
        }
    }

    Ok(SelectorList { selectors })
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|(_, c)| c.is_whitespace()) {
            self.bump();
        }
    }

    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        let mut compounds = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some((_, ',')) => break,
                Some(_) => compounds.push(self.parse_compound()?),
            }
        }

        if compounds.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Selector { compounds })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut components = Vec::new();

        while let Some((pos, ch)) = self.peek() {
            match ch {
                '*' => {
                    self.bump();
                    components.push(Component::Universal);
                }
                '#' => {
                    self.bump();
                    components.push(Component::Id(self.expect_ident()?));
                }
                '.' => {
                    self.bump();
                    components.push(Component::Class(self.expect_ident()?));
                }
                '[' => components.push(Component::Attribute(self.parse_attribute()?)),
                c if is_ident_char(c) => {
                    components.push(Component::Type(self.expect_ident()?));
                }
                c if c.is_whitespace() || c == ',' => break,
                c => return Err(SelectorError::UnexpectedChar { ch: c, pos }),
            }
        }

        Ok(Compound { components })
    }

    fn parse_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some((_, c)) = self.peek() {
            if is_ident_char(c) {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        ident
    }

    fn expect_ident(&mut self) -> Result<String, SelectorError> {
        let ident = self.parse_ident();
        if ident.is_empty() {
            match self.peek() {
                Some((pos, ch)) => Err(SelectorError::UnexpectedChar { ch, pos }),
                None => Err(SelectorError::Empty),
            }
        } else {
            Ok(ident)
        }
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.bump(); // consume '['
        self.skip_whitespace();

        let name = self.expect_ident()?;
        self.skip_whitespace();

        let matcher = match self.peek() {
            Some((_, ']')) => None,
            Some((_, op)) if matches!(op, '=' | '~' | '|' | '^' | '$' | '*') => {
                self.bump();
                if op != '=' {
                    match self.bump() {
                        Some((_, '=')) => {}
                        Some((pos, ch)) => {
                            return Err(SelectorError::UnexpectedChar { ch, pos });
                        }
                        None => return Err(self.unclosed()),
                    }
                }
                let value = self.parse_attribute_value()?;
                Some(match op {
                    '=' => AttributeMatcher::Exact(value),
                    '~' => AttributeMatcher::Contains(value),
                    '|' => AttributeMatcher::DashMatch(value),
                    '^' => AttributeMatcher::Prefix(value),
                    '$' => AttributeMatcher::Suffix(value),
                    _ => AttributeMatcher::Substring(value),
                })
            }
            Some((pos, ch)) => return Err(SelectorError::UnexpectedChar { ch, pos }),
            None => return Err(self.unclosed()),
        };

        self.skip_whitespace();

        // Optional case-insensitivity flag: [attr=value i]
        let mut case_insensitive = false;
        if matcher.is_some() && self.peek().is_some_and(|(_, c)| c == 'i' || c == 'I') {
            self.bump();
            case_insensitive = true;
            self.skip_whitespace();
        }

        match self.bump() {
            Some((_, ']')) => Ok(AttributeSelector {
                name,
                matcher,
                case_insensitive,
            }),
            Some((pos, ch)) => Err(SelectorError::UnexpectedChar { ch, pos }),
            None => Err(self.unclosed()),
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String, SelectorError> {
        self.skip_whitespace();
        match self.peek() {
            Some((_, quote)) if quote == '"' || quote == '\'' => {
                self.bump();
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some((_, c)) if c == quote => break,
                        Some((_, c)) => value.push(c),
                        None => return Err(self.unclosed()),
                    }
                }
                Ok(value)
            }
            Some(_) => {
                let mut value = String::new();
                while let Some((_, c)) = self.peek() {
                    if c.is_whitespace() || c == ']' {
                        break;
                    }
                    value.push(c);
                    self.bump();
                }
                Ok(value)
            }
            None => Err(self.unclosed()),
        }
    }

    fn unclosed(&self) -> SelectorError {
        SelectorError::UnclosedAttribute {
            selector: self.input.to_string(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
