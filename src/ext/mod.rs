/// Extension traits for built-in Rust types.
///
/// Each extension trait lives in its own file named after the type it extends:
/// - `string.rs` - Extensions for `str`
///
/// Conversion extensions for values live in [`crate::convert`] and record
/// getters in [`crate::record`].
pub mod string;

pub use string::StrExt;
