//! Parsing of shell command lines.
//!
//! One line is one command. The first word names it; the remaining words are
//! its arguments. A path written as a JSON array may contain spaces. Commands
//! that take free text (`add`'s value, `import`'s document) receive the rest
//! of the line verbatim.

use crate::document::path::Path;
use crate::error::EditError;
use thiserror::Error;

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the whole document
    Show,
    /// Print the value at a path (the selection when omitted)
    Get(Option<Path>),
    /// Add a key under a parent object
    Add {
        parent: Path,
        key: String,
        value: String,
    },
    /// Rename the key at a path
    Rename { path: Path, new_key: String },
    /// Delete the key at a path
    Delete(Path),
    /// Replace the whole document
    Import(String),
    /// Restore the previous document
    Undo,
    /// Print how many undo steps are available
    History,
    /// Select a path, or clear the selection
    Select(Option<Path>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error(transparent)]
    InvalidPath(#[from] EditError),
}

/// Splits off the first whitespace-delimited word.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    }
}

fn required<'a>(
    word: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if word.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(word)
    }
}

fn optional_path(word: &str) -> Result<Option<Path>, CommandError> {
    if word.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Path::parse(word)?))
    }
}

/// Splits off a path argument.
///
/// A path starting with `[` is a JSON array and runs to its closing bracket,
/// so quoted keys may contain spaces. Anything else is one word.
fn split_path(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    if !text.starts_with('[') {
        return split_word(text);
    }
    let mut in_string = false;
    let mut escaped = false;
    for (pos, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ']' {
            let end = pos + c.len_utf8();
            return (&text[..end], text[end..].trim_start());
        }
    }
    // Unterminated: hand everything to the path parser to reject
    (text, "")
}

/// Source of a command's arguments.
enum Args<'a, S> {
    /// The remainder of a typed line
    Line(&'a str),
    /// Arguments already split by the shell that started the process
    Words(std::slice::Iter<'a, S>),
}

impl<'a, S: AsRef<str>> Args<'a, S> {
    fn word(&mut self) -> &'a str {
        match self {
            Args::Line(rest) => {
                let (word, tail) = split_word(*rest);
                *rest = tail;
                word
            }
            Args::Words(words) => words.next().map(AsRef::as_ref).unwrap_or(""),
        }
    }

    fn path(&mut self) -> &'a str {
        match self {
            Args::Line(rest) => {
                let (path, tail) = split_path(*rest);
                *rest = tail;
                path
            }
            Args::Words(_) => self.word(),
        }
    }

    /// Everything not yet consumed. Split arguments are joined with a space.
    fn rest(&mut self) -> String {
        match self {
            Args::Line(rest) => std::mem::take(rest).trim_end().to_string(),
            Args::Words(words) => words
                .by_ref()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(" "),
        }
    }
}

fn build_command<S: AsRef<str>>(name: &str, mut args: Args<'_, S>) -> Result<Command, CommandError> {
    let command = match name {
        "show" => Command::Show,
        "get" => Command::Get(optional_path(args.path())?),
        "add" => {
            let parent = Path::parse(required(args.path(), "add", "a parent path")?)?;
            let key = required(args.word(), "add", "a key")?.to_string();
            Command::Add {
                parent,
                key,
                value: args.rest(),
            }
        }
        "rename" | "mv" => {
            let path = Path::parse(required(args.path(), "rename", "a path")?)?;
            let new_key = required(args.word(), "rename", "a new key")?.to_string();
            Command::Rename { path, new_key }
        }
        "delete" | "rm" => Command::Delete(Path::parse(required(args.path(), "delete", "a path")?)?),
        "import" => {
            let text = args.rest();
            Command::Import(required(&text, "import", "a JSON document")?.to_string())
        }
        "undo" | "u" => Command::Undo,
        "history" => Command::History,
        "select" => Command::Select(optional_path(args.path())?),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Parses one line. Blank lines yield `Ok(None)`.
///
/// ```
/// use treequill::document::path::Path;
/// use treequill::input::command::{parse_command, Command};
///
/// let cmd = parse_command("add a.b greeting hello world").unwrap();
/// assert_eq!(
///     cmd,
///     Some(Command::Add {
///         parent: Path::new(["a", "b"]),
///         key: "greeting".to_string(),
///         value: "hello world".to_string(),
///     })
/// );
///
/// let cmd = parse_command(r#"get ["first name"]"#).unwrap();
/// assert_eq!(cmd, Some(Command::Get(Some(Path::new(["first name"])))));
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let (name, rest) = split_word(line);
    if name.is_empty() {
        return Ok(None);
    }
    build_command(name, Args::<&str>::Line(rest)).map(Some)
}

/// Parses a command already split into arguments, such as a process's argv.
///
/// Each argument is taken whole, so a path or key may contain spaces without
/// the JSON array form. Trailing arguments of `add` and `import` are joined
/// with single spaces. An empty slice yields `Ok(None)`.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Option<Command>, CommandError> {
    let mut words = args.iter();
    let Some(name): Option<&str> = words.next().map(AsRef::as_ref) else {
        return Ok(None);
    };
    if name.trim().is_empty() {
        return Ok(None);
    }
    build_command(name.trim(), Args::Words(words)).map(Some)
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
Paths are dotted keys (a.b.c), '.' for the root, or a JSON array ([\"a.b\",\"c\"]).

  show                      print the document
  get [PATH]                print the value at PATH (default: selection)
  add PARENT KEY [VALUE]    add KEY under PARENT; VALUE is JSON or plain text
  rename PATH NEWKEY        rename the key at PATH
  delete PATH               delete the key at PATH
  import JSON               replace the document
  undo                      restore the previous document
  history                   show available undo steps
  select [PATH]             select PATH (no argument clears)
  help                      show this text
  quit                      leave";
