// rmm-rs: RimWorld Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              RmmError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+------+------+
//!   |      |      |       |      |      |      |
//!   v      v      v       v      v      v      v
//! List   Order  Store   Scan   Cfg    Io    Other
//!  Box    Box    Box     Box    Box    Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   List    MalformedEntry, UnrecognizedFormat
//!   Order   DependencyCycle
//!   Store   NotFound, Read, Write
//!   Scan    RootNotFound, Metadata, Pattern
//!   Config  ParseError, MissingKey, InvalidValue
//! ```
//!
//! `MalformedEntry` is recovered locally by the list codecs. Everything else
//! is structural and surfaces to the caller.

use std::fmt;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RmmError`].
pub type RmmResult<T> = std::result::Result<T, RmmError>;

/// Result type for persistence collaborators.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum RmmError {
    /// Mod list parsing or format detection failed.
    #[error("list error: {0}")]
    List(#[from] Box<ListError>),

    /// Load order could not be resolved.
    #[error("order error: {0}")]
    Order(#[from] Box<OrderError>),

    /// Persistence collaborator failed.
    #[error("store error: {0}")]
    Store(#[from] Box<StoreError>),

    /// Record supplier failed.
    #[error("scan error: {0}")]
    Scan(#[from] Box<ScanError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RmmError {
                fn from(err: $error) -> Self {
                    RmmError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ListError => List,
    OrderError => Order,
    StoreError => Store,
    ScanError => Scan,
    ConfigError => Config,
    std::io::Error => Io,
}

impl From<DependencyCycle> for RmmError {
    fn from(cycle: DependencyCycle) -> Self {
        Self::Order(Box::new(OrderError::DependencyCycle(cycle)))
    }
}

// --- List Errors ---

/// Mod list format errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// A single line or row could not be parsed. Skipped by the codecs.
    #[error("malformed entry on line {line}: {reason} ('{content}')")]
    MalformedEntry {
        line: usize,
        content: String,
        reason: String,
    },

    /// No list format recognized the input.
    #[error("unrecognized mod list format (starts with '{preview}')")]
    UnrecognizedFormat { preview: String },
}

// --- Order Errors ---

/// Load order resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The ordering graph is not acyclic.
    #[error(transparent)]
    DependencyCycle(#[from] DependencyCycle),
}

/// Every package id that takes part in at least one ordering cycle.
///
/// `members` lists all participants in tie-break order, `cycles` groups them
/// by strongly connected component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct DependencyCycle {
    members: Vec<String>,
    cycles: Vec<Vec<String>>,
}

impl DependencyCycle {
    /// Creates a cycle report from its grouped components.
    ///
    /// Components are expected in tie-break order; `members` is their
    /// concatenation re-sorted by the same order.
    #[must_use]
    pub(crate) const fn new(members: Vec<String>, cycles: Vec<Vec<String>>) -> Self {
        Self { members, cycles }
    }

    /// All package ids participating in a cycle.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Package ids grouped by cycle.
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// Whether `package_id` takes part in a cycle.
    #[must_use]
    pub fn contains(&self, package_id: &str) -> bool {
        self.members.iter().any(|m| m == package_id)
    }
}

impl fmt::Display for DependencyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dependency cycle among: ")?;
        let groups: Vec<String> = self.cycles.iter().map(|c| c.join(" <-> ")).collect();
        write!(f, "{}", groups.join("; "))
    }
}

// --- Store Errors ---

/// Persistence collaborator errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The list file does not exist.
    #[error("list file not found: {0}")]
    NotFound(String),

    /// Reading the list failed.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the list failed.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Scan Errors ---

/// Record supplier errors.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The mods directory does not exist.
    #[error("mods directory not found: {0}")]
    RootNotFound(String),

    /// A mod's metadata could not be read.
    #[error("invalid metadata in '{path}': {message}")]
    Metadata { path: String, message: String },

    /// A metadata pattern failed to compile.
    #[error("invalid metadata pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
