// src/exec/tokenizer.rs

//! Shell-style splitting of a command string into an argument vector.
//!
//! Supported syntax:
//! - whitespace separates arguments
//! - `'...'` is fully literal
//! - `"..."` is literal except for `\"`, `\\`, `` \` `` and `\$`
//! - `\x` outside quotes is a literal `x`; backslash-newline is dropped
//! - `` `...` `` is substituted literally (never executed). Outside double
//!   quotes its content is split on whitespace like any other unquoted text.
//! - an unquoted `|` separates pipeline stages
//!
//! Only the first pipeline stage is ever run; later stages are checked for
//! syntax and then discarded by [`tokenize`].

use std::str::Chars;

use crate::errors::{DyncompError, Result};

/// Split `command` and return the argument vector of its first pipeline
/// stage.
///
/// ``ls `echo /` | wc -l`` yields `["ls", "echo", "/"]`.
pub fn tokenize(command: &str) -> Result<Vec<String>> {
    let mut stages = tokenize_pipeline(command)?;
    // tokenize_pipeline never returns an empty list.
    Ok(stages.swap_remove(0))
}

/// Split `command` into all of its pipeline stages.
///
/// Every returned stage has at least one argument.
pub fn tokenize_pipeline(command: &str) -> Result<Vec<Vec<String>>> {
    let mut lexer = Lexer::default();
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match c {
            '|' => lexer.end_stage()?,
            '\'' => {
                lexer.started = true;
                read_single_quoted(&mut chars, &mut lexer.word)?;
            }
            '"' => {
                lexer.started = true;
                read_double_quoted(&mut chars, &mut lexer.word)?;
            }
            '`' => {
                let content = read_backquoted(&mut chars)?;
                lexer.push_unquoted(&content);
            }
            '\\' => match chars.next() {
                Some('\n') => {}
                Some(escaped) => lexer.push_char(escaped),
                None => return Err(DyncompError::syntax("trailing backslash")),
            },
            c if c.is_whitespace() => lexer.end_word(),
            c => lexer.push_char(c),
        }
    }

    lexer.finish()
}

#[derive(Debug, Default)]
struct Lexer {
    stages: Vec<Vec<String>>,
    args: Vec<String>,
    word: String,
    /// Set once the current word has content or an (even empty) quoted part.
    started: bool,
}

impl Lexer {
    fn push_char(&mut self, c: char) {
        self.word.push(c);
        self.started = true;
    }

    /// Append text that is subject to word splitting.
    fn push_unquoted(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                self.end_word();
            } else {
                self.push_char(c);
            }
        }
    }

    fn end_word(&mut self) {
        if self.started {
            self.args.push(std::mem::take(&mut self.word));
            self.started = false;
        }
    }

    fn end_stage(&mut self) -> Result<()> {
        self.end_word();
        if self.args.is_empty() {
            return Err(DyncompError::syntax("empty pipeline stage"));
        }
        self.stages.push(std::mem::take(&mut self.args));
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Vec<String>>> {
        self.end_word();
        if self.args.is_empty() {
            return Err(if self.stages.is_empty() {
                DyncompError::syntax("empty command")
            } else {
                DyncompError::syntax("empty pipeline stage")
            });
        }
        self.stages.push(self.args);
        Ok(self.stages)
    }
}

fn read_single_quoted(chars: &mut Chars<'_>, out: &mut String) -> Result<()> {
    for c in chars.by_ref() {
        if c == '\'' {
            return Ok(());
        }
        out.push(c);
    }
    Err(DyncompError::syntax("unterminated single quote"))
}

fn read_double_quoted(chars: &mut Chars<'_>, out: &mut String) -> Result<()> {
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(()),
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\' | '`' | '$')) => out.push(escaped),
                Some('\n') => {}
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            '`' => out.push_str(&read_backquoted(chars)?),
            c => out.push(c),
        }
    }
    Err(DyncompError::syntax("unterminated double quote"))
}

/// Read up to the closing back-quote and return the raw content.
fn read_backquoted(chars: &mut Chars<'_>) -> Result<String> {
    let mut content = String::new();
    while let Some(c) = chars.next() {
        match c {
            '`' => return Ok(content),
            '\\' => match chars.next() {
                Some(escaped @ ('`' | '\\' | '$')) => content.push(escaped),
                Some(other) => {
                    content.push('\\');
                    content.push(other);
                }
                None => break,
            },
            c => content.push(c),
        }
    }
    Err(DyncompError::syntax("unterminated back-quote"))
}
