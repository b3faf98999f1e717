//! Common error infrastructure for descent-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., `AbilityError`, `InventoryError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation family has its own error type with specific variants
//! - **Rich Context**: Errors include hero, floor and depth for debugging
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Never Fatal to a Session**: Public entry points turn errors into result objects
//!   with a message; nothing in the core aborts an otherwise playable run

use crate::state::HeroId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed later (cooldowns, charges)
/// - **Validation**: Invalid input, usually stale UI state (unknown ids, wrong slot)
/// - **Corruption**: Malformed persisted data that was repaired or skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later.
    ///
    /// Examples: ability on cooldown, no charges left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: ability id not on hero, item not in inventory
    Validation,

    /// Corrupted data was encountered and handled locally.
    ///
    /// Examples: consumable without effects, unregistered unique-effect id
    Corruption,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Corruption => "corruption",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Hero that triggered the error (if applicable).
    pub hero: Option<HeroId>,

    /// Floor counter at the time of error.
    pub floor: u32,

    /// Depth counter at the time of error.
    pub depth: u32,
}

impl ErrorContext {
    /// Creates a new error context at the given progression counters.
    #[must_use]
    pub const fn new(floor: u32, depth: u32) -> Self {
        Self {
            hero: None,
            floor,
            depth,
        }
    }

    /// Attaches a hero to this context (builder pattern).
    #[must_use]
    pub const fn with_hero(mut self, hero: HeroId) -> Self {
        self.hero = Some(hero);
        self
    }
}

/// Common trait for all descent-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
