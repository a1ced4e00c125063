/// Handles argument parsing and command dispatch.
pub mod cli;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Target type descriptors.
pub mod types;

/// The dynamic value model.
pub mod value;

/// Locale rules and number styles.
pub mod culture;

/// Culture-aware literal parsing.
pub mod parse;

/// Strict and defaulting conversions.
pub mod convert;

/// Typed getters over row-like records.
pub mod record;

/// Stream draining and binary serialization helpers.
pub mod ioutils;

/// Registered, name-based member access.
pub mod reflect;

/// Extension traits for built-in types.
pub mod ext;

/// XML DOM and XML/JSON bridging.
pub mod xml;
