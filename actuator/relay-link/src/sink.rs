//! Byte-command sinks the controller writes through.

use std::io::Write;

use crate::{RelayCommand, RelayError};

/// Capability trait over the relay's byte-command channel.
///
/// The controller depends on this trait rather than a concrete transport, so
/// tests can substitute [`RecordingSink`] and assert on the exact command
/// sequence without hardware.
pub trait CommandSink {
    /// Delivers one command frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Transport`] if the frame could not be written.
    /// Delivery is at-most-once: the sink must not retry internally.
    fn send(&mut self, command: RelayCommand) -> Result<(), RelayError>;
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn send(&mut self, command: RelayCommand) -> Result<(), RelayError> {
        (**self).send(command)
    }
}

/// Sink over any byte-oriented writer (device file, TCP stream).
///
/// Each command writes its 4-byte frame and flushes, so a command is either
/// fully on the wire or reported failed.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W> {
    /// Wraps a writer as a command sink.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for WriterSink<W> {
    fn send(&mut self, command: RelayCommand) -> Result<(), RelayError> {
        self.writer.write_all(&command.frame())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory sink that records every command; for tests and dry runs.
///
/// # Example
///
/// ```
/// use relay_link::{CommandSink, RecordingSink, RelayCommand};
///
/// let mut sink = RecordingSink::new();
/// sink.send(RelayCommand::Clear).unwrap();
/// assert_eq!(sink.commands(), &[RelayCommand::Clear]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<RelayCommand>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Every command sent so far, in order.
    #[must_use]
    pub fn commands(&self) -> &[RelayCommand] {
        &self.commands
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, command: RelayCommand) -> Result<(), RelayError> {
        self.commands.push(command);
        Ok(())
    }
}
