//! Error types for mask compilation and candidate generation.
//!
//! Every error here is fatal to the run: the binary prints it with its
//! cause chain and exits non-zero. Variants carry the offending input so
//! the message can name exactly what was malformed.

use bstr::BString;
use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// `?` followed by an unknown selector, or a dangling `?` at the end
    /// of the mask.
    #[error("syntax error in mask '{0}'")]
    MaskSyntax(BString),

    /// `?` followed by an unknown selector, or a dangling `?` at the end
    /// of a custom charset expression.
    #[error("syntax error in custom charset {index} '{expr}'")]
    CharsetSyntax { index: usize, expr: BString },

    /// The mask references a `?1`-`?4` charset that was never supplied.
    #[error("custom charset ?{0} is used in the mask but was not defined")]
    UndefinedCharset(usize),

    /// A mask position compiled to an empty symbol set.
    #[error("mask position {0} has an empty charset")]
    EmptyCharset(usize),

    /// The mask compiled to zero positions.
    #[error("mask is empty")]
    EmptyMask,

    /// More mask positions than the 256-position ceiling.
    #[error("mask has {0} positions, the maximum is 256")]
    MaskTooLong(usize),

    /// A custom charset expanded past the 256-byte ceiling.
    #[error("custom charset {index} expands to {len} bytes, the maximum is 256")]
    CharsetTooLong { index: usize, len: usize },

    /// Two options that cannot be used together.
    #[error("{left} cannot be used with {right}")]
    ConflictingOptions {
        left: &'static str,
        right: &'static str,
    },

    /// A run or occurrence bound of 1 is always true and therefore
    /// meaningless.
    #[error("{0} must be set to at least 2")]
    ThresholdTooLow(&'static str),

    /// A start-at or stop-at word whose length disagrees with the mask.
    #[error("length of {option} '{value}' is {have}, but the mask has {want} positions")]
    LengthMismatch {
        option: &'static str,
        value: BString,
        have: usize,
        want: usize,
    },

    /// A start-at or stop-at character that does not exist in the charset
    /// compiled for its position.
    #[error("value '{ch}' in position {position} of {option} '{value}' is not part of the mask's charset at that position")]
    CharNotFound {
        option: &'static str,
        ch: char,
        position: usize,
        value: BString,
    },
}
