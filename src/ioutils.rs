use std::io::Read;

use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::constants::STDIN_INDICATOR;
use crate::error::{Error, Result};

/// Reads `reader` to exhaustion and returns everything it produced.
///
/// The reader is only borrowed; it is neither rewound nor closed.
pub fn drain<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(Error::Io)?;
    debug!("Drained {} bytes", buf.len());
    Ok(buf)
}

/// Serializes an object graph into its binary form.
pub fn to_byte_array<T: Serialize + ?Sized>(data: &T) -> Result<Vec<u8>> {
    Ok(bincode::serialize(data)?)
}

/// Restores an object graph written by [`to_byte_array`].
pub fn from_byte_array<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(bincode::deserialize(bytes)?)
}

pub fn read_from(mut reader: impl Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::Io)?;
    Ok(buf)
}

/// Returns `input` itself, or the whole of stdin when it is `-`.
pub fn read_input(input: &str) -> Result<String> {
    if input == STDIN_INDICATOR {
        read_from(std::io::stdin())
    } else {
        Ok(input.to_string())
    }
}
