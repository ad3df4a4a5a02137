use thiserror::Error;

/// Errors produced while parsing a key combination string such as `"ctrl+s"`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComboParseError {
    /// The combination string was empty or only whitespace.
    #[error("empty key combination")]
    Empty,

    /// A `+` separator with nothing on one side (e.g. `"ctrl++"`).
    #[error("invalid key combination syntax: '{combo}' (write 'plus' for the + key)")]
    InvalidSyntax {
        /// The offending combination string.
        combo: String,
    },

    /// Only modifiers were given (e.g. `"ctrl+shift"`).
    #[error("key combination '{combo}' has no primary key")]
    MissingKey {
        /// The offending combination string.
        combo: String,
    },

    /// More than one non-modifier key was given (e.g. `"a+b"`).
    #[error("key combination '{combo}' names more than one primary key")]
    MultipleKeys {
        /// The offending combination string.
        combo: String,
    },

    /// A multi-character key name that is neither a modifier nor a known key.
    #[error("unknown key name '{key}' in '{combo}'")]
    UnknownKey {
        /// The offending combination string.
        combo: String,
        /// The part that could not be recognized.
        key: String,
    },
}

/// Configuration errors raised when binding tables are (re)declared.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HotkeysError {
    /// A declared binding carries a combination string that does not parse.
    ///
    /// `index` is the descriptor's position in the declared sequence.
    #[error("hotkey #{index} ({label:?}) has an invalid combination: {source}")]
    InvalidBinding {
        /// Position of the descriptor in the sequence passed to `replace`.
        index: usize,
        /// The descriptor's display label.
        label: String,
        /// The underlying parse failure.
        #[source]
        source: ComboParseError,
    },
}
