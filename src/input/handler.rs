//! Executes shell commands against an [`Engine`].
//!
//! The handler is the caller the engine expects: it owns the selection and
//! prints documents after each change. Errors go to a separate writer and
//! never stop the loop.

use super::command::{parse_args, parse_command, Command, CommandError, HELP};
use crate::document::parser::{to_compact_string, to_json_string};
use crate::document::path::Path;
use crate::document::tree::NodeRef;
use crate::editor::engine::Engine;
use anyhow::Result;
use std::io::{BufRead, Write};

/// What the shell should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The command was rejected; an interactive shell keeps going
    Failed,
    Quit,
}

/// Runs commands and tracks the current selection.
#[derive(Debug)]
pub struct CommandHandler {
    engine: Engine,
    selected: Option<Path>,
    indent_size: usize,
}

impl CommandHandler {
    pub fn new(engine: Engine, indent_size: usize) -> Self {
        Self {
            engine,
            selected: None,
            indent_size,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_ref()
    }

    fn render(&self, node: NodeRef<'_>) -> Result<String> {
        match node.as_object() {
            Some(map) => to_json_string(map, self.indent_size),
            None => Ok(node.as_value().map(to_compact_string).unwrap_or_default()),
        }
    }

    fn print_document<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "{}",
            to_json_string(self.engine.document(), self.indent_size)?
        )?;
        Ok(())
    }

    /// Executes a parsed command.
    ///
    /// Results go to `out`. A rejected edit is reported on `err` and yields
    /// [`Flow::Failed`]; only I/O errors are returned as `Err`.
    pub fn execute<W: Write, E: Write>(&mut self, command: Command, out: &mut W, err: &mut E) -> Result<Flow> {
        match command {
            Command::Show => self.print_document(out)?,
            Command::Get(path) => {
                let path = path.or_else(|| self.selected.clone()).unwrap_or_default();
                match self.engine.get(&path) {
                    Some(node) => writeln!(out, "{}", self.render(node)?)?,
                    None => writeln!(out, "(absent) {}", path)?,
                }
            }
            Command::Add { parent, key, value } => {
                if let Err(e) = self.engine.add_property(&parent, &key, &value) {
                    return report(err, e);
                }
                self.print_document(out)?
            }
            Command::Rename { path, new_key } => {
                if let Err(e) = self.engine.rename_property(&path, &new_key) {
                    return report(err, e);
                }
                if self.selected.as_ref() == Some(&path) {
                    self.selected = path.parent().map(|parent| parent.child(new_key));
                }
                self.print_document(out)?
            }
            Command::Delete(path) => {
                let deleted = self.engine.delete_node(&path).is_some();
                if deleted {
                    if self
                        .selected
                        .as_ref()
                        .is_some_and(|selected| selected.starts_with(&path))
                    {
                        self.selected = None;
                    }
                } else if !path.is_root() {
                    writeln!(out, "nothing to delete at {}", path)?;
                }
                self.print_document(out)?
            }
            Command::Import(text) => {
                if let Err(e) = self.engine.replace_document(&text) {
                    return report(err, e);
                }
                self.selected = None;
                self.print_document(out)?
            }
            Command::Undo => {
                if self.engine.undo().is_some() {
                    self.print_document(out)?
                } else {
                    writeln!(out, "nothing to undo")?
                }
            }
            Command::History => writeln!(
                out,
                "{} of {} undo steps available",
                self.engine.history_len(),
                self.engine.history_limit()
            )?,
            Command::Select(path) => {
                self.selected = path;
                match &self.selected {
                    Some(path) => writeln!(out, "selected {}", path)?,
                    None => writeln!(out, "selection cleared")?,
                }
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Parses and executes one line.
    pub fn execute_line<W: Write, E: Write>(&mut self, line: &str, out: &mut W, err: &mut E) -> Result<Flow> {
        self.dispatch(parse_command(line), out, err)
    }

    /// Executes a command given as separate arguments, keeping each one whole.
    pub fn execute_args<S: AsRef<str>, W: Write, E: Write>(
        &mut self,
        args: &[S],
        out: &mut W,
        err: &mut E,
    ) -> Result<Flow> {
        self.dispatch(parse_args(args), out, err)
    }

    fn dispatch<W: Write, E: Write>(
        &mut self,
        parsed: std::result::Result<Option<Command>, CommandError>,
        out: &mut W,
        err: &mut E,
    ) -> Result<Flow> {
        match parsed {
            Ok(Some(command)) => self.execute(command, out, err),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => report(err, e),
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    ///
    /// `prompt` is written to `out` before each line when present. Failed
    /// commands are reported on `err` and do not stop the loop.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        input: R,
        out: &mut W,
        err: &mut E,
        prompt: Option<&str>,
    ) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = prompt {
                write!(out, "{}", prompt)?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if self.execute_line(&line?, out, err)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }
}

fn report<E: Write>(err: &mut E, error: impl std::fmt::Display) -> Result<Flow> {
    writeln!(err, "error: {}", error)?;
    Ok(Flow::Failed)
}
