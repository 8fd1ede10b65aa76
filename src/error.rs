use thiserror::Error;

/// Errors raised by the menu engine itself.
///
/// The first two are configuration errors, reported when a menu is built and
/// before any session can start. Bad user input is never an error: it ends up
/// in the status line instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// An option has no usable key, e.g. a description line without a colon.
    #[error("menu option '{line}' has no key")]
    MissingKey { line: String },

    /// Two options fold to the same key.
    #[error("menu key '{key}' is used by both '{first}' and '{second}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    /// The terminal ran out of input while a handler was waiting for a line.
    #[error("input closed while waiting for '{prompt}'")]
    InputClosed { prompt: String },
}
