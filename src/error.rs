//! Error types.

use thiserror::Error;

use crate::Uuid;

/// The boxed error a [`StateStore`](crate::StateStore) implementation reports.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while constructing a generator or producing its inputs.
#[derive(Debug, Error)]
pub enum Error {
    /// No network interface supplied a usable hardware address.
    #[error("node identifier unavailable: {0}")]
    NodeUnavailable(String),

    /// The cryptographically secure random number generator failed.
    #[error("secure random source failed")]
    RandomSource(#[source] rand::Error),

    /// Prior generator state exists but could not be read or decoded.
    #[error("failed to load generator state")]
    Load(#[source] StoreError),

    /// Generator state could not be written.
    #[error("failed to save generator state")]
    Save(#[source] StoreError),
}

/// Error returned by [`Generator::generate`](crate::Generator::generate) when the UUID was
/// produced but the updated state could not be persisted.
///
/// The UUID is still valid for use. A restart before the next successful save, however, may
/// reuse its clock sequence.
#[derive(Debug, Error)]
#[error("generated {uuid} but could not persist generator state")]
pub struct PersistError {
    uuid: Uuid,
    #[source]
    source: Error,
}

impl PersistError {
    pub(crate) fn new(uuid: Uuid, source: Error) -> Self {
        Self { uuid, source }
    }

    /// Returns the UUID that was generated before persistence failed.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the underlying persistence error.
    pub fn error(&self) -> &Error {
        &self.source
    }

    /// Splits the error into the generated UUID and the underlying persistence error.
    pub fn into_parts(self) -> (Uuid, Error) {
        (self.uuid, self.source)
    }
}
