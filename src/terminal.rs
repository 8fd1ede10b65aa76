use crate::io_adapters::SharedBuffer;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Cursor, StdinLock, Stdout, Write};
use tracing::debug;

/// The line-oriented input and output a menu session talks through.
///
/// A menu never touches the process streams directly; it is handed a terminal
/// and everything it prints or reads goes through it.
pub trait Terminal {
    /// Show `prompt` (no newline) and read one line without its terminator.
    ///
    /// Returns `Ok(None)` once there is no more input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Where menu text, status lines and handler output go.
    fn output(&mut self) -> &mut dyn Write;
}

impl<T: Terminal + ?Sized> Terminal for Box<T> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn output(&mut self) -> &mut dyn Write {
        (**self).output()
    }
}

/// Terminal over any buffered reader and writer.
pub struct StreamTerminal<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamTerminal<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Take the reader and writer back.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl StreamTerminal<StdinLock<'static>, Stdout> {
    /// Locked standard input and standard output.
    ///
    /// The stdin lock is held until the terminal is dropped; use
    /// [`StdioTerminal`] when something else may read stdin meanwhile.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl StreamTerminal<Cursor<Vec<u8>>, SharedBuffer> {
    /// A terminal that answers prompts from `input` and records everything it
    /// is asked to print, prompts included.
    ///
    /// Example
    /// ```
    /// use menu_engine::{StreamTerminal, Terminal};
    ///
    /// let (mut term, out) = StreamTerminal::scripted("a\nb\n");
    /// assert_eq!(term.read_line("> ").unwrap().as_deref(), Some("a"));
    /// assert_eq!(term.read_line("> ").unwrap().as_deref(), Some("b"));
    /// assert_eq!(term.read_line("> ").unwrap(), None);
    /// assert_eq!(out.contents(), "> > > ");
    /// ```
    pub fn scripted(input: impl Into<String>) -> (Self, SharedBuffer) {
        let (writer, handle) = SharedBuffer::with_handle();
        let input: String = input.into();
        (Self::new(Cursor::new(input.into_bytes()), writer), handle)
    }
}

impl<R: BufRead, W: Write> Terminal for StreamTerminal<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.writer
    }
}

/// The process standard input and output.
///
/// Stdin is locked only while a line is being read, so other code may read it
/// between prompts.
pub struct StdioTerminal {
    stdout: Stdout,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdioTerminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.stdout, "{}", prompt)?;
        self.stdout.flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }
}

/// Interactive terminal with line editing and history, backed by rustyline.
pub struct EditorTerminal {
    editor: DefaultEditor,
    stdout: Stdout,
}

impl EditorTerminal {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            stdout: io::stdout(),
        })
    }
}

impl Terminal for EditorTerminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.stdout.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor
                        .add_history_entry(line.as_str())
                        .map_err(|err| io::Error::other(err.to_string()))?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                debug!("line editor interrupted");
                Ok(None)
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(io::Error::other(err.to_string())),
        }
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
