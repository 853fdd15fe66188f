use std::error;

use derive_more::{Display, From};
use log::debug;

use super::{
    section_reader::RecordReader,
    table_object::{TableArray, TableMap, TableObject, TableValue},
    tokenizer::{RawToken, Tokenizer, TokenizerError},
};

/// An error that occurred while parsing one section body.
#[derive(Debug, From, Display)]
pub enum SectionError {
    TokenizerError(TokenizerError),
    /// A token was in some way unexpected.
    #[display("unexpected token at byte {}: {}", _0, _1)]
    UnexpectedToken(usize, &'static str),
    /// More blocks were opened than closed.
    #[display("unclosed block")]
    UnclosedBlock,
}

impl error::Error for SectionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::TokenizerError(err) => Some(err),
            _ => None,
        }
    }
}

/// A scalar whose role is not yet known: the next token decides whether it is
/// a key (an `=` follows) or a bare array element (anything else follows).
enum Pending<'a> {
    None,
    Scalar(&'a str, bool),
    Key(&'a str),
}

/// Accumulates the entries of one table literal while it is being parsed.
/// Whether the table is a map or an array is only decided once it closes:
/// any keyed entry makes it a map, otherwise it is an array. This mirrors the
/// dump syntax, where `{}` , `{a,b}` and `{x=1}` are all one literal form.
struct TableBuilder {
    key: Option<String>,
    map: TableMap,
    items: TableArray,
}

impl TableBuilder {
    fn new(key: Option<String>) -> Self {
        TableBuilder {
            key,
            map: TableMap::new(),
            items: TableArray::new(),
        }
    }

    fn insert(&mut self, key: &str, value: TableValue) {
        self.map.insert(key.to_owned(), value);
    }

    fn push(&mut self, value: TableValue) {
        self.items.push(value);
    }

    fn finish(self) -> (Option<String>, TableObject) {
        if self.map.is_empty() {
            (self.key, TableObject::Array(self.items))
        } else {
            if !self.items.is_empty() {
                debug!(
                    "dropping {} bare values from a keyed table",
                    self.items.len()
                );
            }
            (self.key, TableObject::Map(self.map))
        }
    }
}

/// One named table literal sliced out of the dump, the unit the readers
/// yield. `body` is the text between the outer braces, already verified to be
/// balanced by the reader that produced it.
pub struct Section<'a> {
    name: &'a str,
    body: &'a str,
}

impl<'a> Section<'a> {
    pub fn new(name: &'a str, body: &'a str) -> Self {
        Section { name, body }
    }

    pub fn get_name(&self) -> &str {
        self.name
    }

    /// Iterate over the `[N] = { ... }` records within this section.
    pub fn records(&self) -> RecordReader<'a> {
        RecordReader::new(self.body)
    }

    /// Parse the section body into a [TableObject] tree.
    ///
    /// One grammar for every nesting depth: mapping literal =
    /// `{` (key `=` value `,`?)* `}`, value = quoted string | integer |
    /// identifier path | table literal, key = identifier | `[` integer `]`.
    /// Separators are commas; stray whitespace is insignificant.
    pub fn parse(&self) -> Result<TableObject, SectionError> {
        let mut tokens = Tokenizer::new(self.body);
        let mut stack = vec![TableBuilder::new(None)];
        let mut pending = Pending::None;
        while let Some(token) = tokens.next() {
            match token? {
                RawToken::Scalar { text, quoted } => match pending {
                    Pending::None => pending = Pending::Scalar(text, quoted),
                    Pending::Scalar(prev, prev_quoted) => {
                        // two scalars in a row, the first was a bare element
                        last_builder(&mut stack)?
                            .push(TableValue::from_scalar(prev, prev_quoted));
                        pending = Pending::Scalar(text, quoted);
                    }
                    Pending::Key(key) => {
                        last_builder(&mut stack)?
                            .insert(key, TableValue::from_scalar(text, quoted));
                        pending = Pending::None;
                    }
                },
                RawToken::Equal => match pending {
                    Pending::Scalar(text, _) => pending = Pending::Key(text),
                    _ => {
                        return Err(SectionError::UnexpectedToken(
                            tokens.pos(),
                            "assignment without a key",
                        ))
                    }
                },
                RawToken::Open => {
                    let key = match pending {
                        Pending::Key(key) => Some(key.to_owned()),
                        Pending::Scalar(prev, prev_quoted) => {
                            last_builder(&mut stack)?
                                .push(TableValue::from_scalar(prev, prev_quoted));
                            None
                        }
                        Pending::None => None,
                    };
                    pending = Pending::None;
                    stack.push(TableBuilder::new(key));
                }
                RawToken::Close => {
                    match pending {
                        Pending::Scalar(prev, prev_quoted) => {
                            last_builder(&mut stack)?
                                .push(TableValue::from_scalar(prev, prev_quoted));
                        }
                        Pending::Key(_) => {
                            return Err(SectionError::UnexpectedToken(
                                tokens.pos(),
                                "assignment without a value",
                            ))
                        }
                        Pending::None => {}
                    }
                    pending = Pending::None;
                    if stack.len() < 2 {
                        return Err(SectionError::UnexpectedToken(
                            tokens.pos(),
                            "close without a matching open",
                        ));
                    }
                    let (key, object) = stack.pop().map(TableBuilder::finish).ok_or(
                        SectionError::UnexpectedToken(tokens.pos(), "empty builder stack"),
                    )?;
                    let parent = last_builder(&mut stack)?;
                    match key {
                        Some(key) => parent.insert(&key, TableValue::Object(object)),
                        None => parent.push(TableValue::Object(object)),
                    }
                }
                RawToken::Comma => match pending {
                    Pending::Scalar(prev, prev_quoted) => {
                        last_builder(&mut stack)?
                            .push(TableValue::from_scalar(prev, prev_quoted));
                        pending = Pending::None;
                    }
                    Pending::Key(_) => {
                        return Err(SectionError::UnexpectedToken(
                            tokens.pos(),
                            "assignment without a value",
                        ))
                    }
                    // stray and trailing commas are syntax sugar
                    Pending::None => {}
                },
            }
        }
        match pending {
            Pending::Scalar(prev, prev_quoted) => {
                last_builder(&mut stack)?.push(TableValue::from_scalar(prev, prev_quoted));
            }
            Pending::Key(_) => {
                return Err(SectionError::UnexpectedToken(
                    tokens.pos(),
                    "assignment without a value",
                ))
            }
            Pending::None => {}
        }
        if stack.len() != 1 {
            return Err(SectionError::UnclosedBlock);
        }
        Ok(stack
            .pop()
            .map(TableBuilder::finish)
            .map(|(_, object)| object)
            .unwrap_or(TableObject::Array(TableArray::new())))
    }
}

fn last_builder<'s>(stack: &'s mut Vec<TableBuilder>) -> Result<&'s mut TableBuilder, SectionError> {
    stack
        .last_mut()
        .ok_or(SectionError::UnexpectedToken(0, "empty builder stack"))
}
