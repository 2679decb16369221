//! Common error infrastructure for board-core.
//!
//! Domain-specific errors (e.g. [`NotationError`](crate::NotationError),
//! [`OutOfRangeError`](crate::OutOfRangeError)) are defined in their respective
//! modules next to the operations that raise them. This module holds the
//! shared classification used by hosts to decide whether an error is absorbed
//! into a no-op or surfaced to the player.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each module has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No Retries**: Nothing in the engine retries; errors are either absorbed
//!   by the caller or surfaced synchronously

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Normal "nothing there" outcomes of user input; callers
///   treat them as no-ops
/// - **Validation**: Malformed data that must be surfaced to the host
/// - **Fatal**: The engine cannot be constructed from the given input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Recoverable error - the input simply names nothing on the board.
    ///
    /// Examples: coordinate outside the file range, rank below zero
    Recoverable,

    /// Validation error - malformed input, should not be retried unchanged.
    ///
    /// Examples: notation with an unknown file letter, ragged board shape
    Validation,

    /// Fatal error - the encounter cannot be set up.
    ///
    /// Examples: no occupiable starting placement
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error should be absorbed into a no-op.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all board-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BoardError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
