//! Serialization of adapter configuration.
//!
//! Configuration objects are turned into bytes with a format that suits their
//! contents: plain structs go through `bincode`, configurations carrying
//! free-form JSON values go through `serde_json`.

use std::error::Error;
use std::path::Path;

/// A trait for parameter representations that can be serialized to and from bytes.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + From<std::io::Error> + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;

    /// Write the serialized parameters to a file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read parameters previously written with [`save_to_file`](Self::save_to_file).
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
