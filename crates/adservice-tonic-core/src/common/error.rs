//! Error types for the ad-selection service.
//!
//! This module defines the central `Error` enum covering the faults the
//! service can report. It implements `From<Error>` for `tonic::Status` so
//! errors propagate to gRPC clients with appropriate status codes.
//!
//! ## Error Cases
//! - `CatalogMisconfiguration`: the ad catalog violates its invariants
//!   (empty catalog or empty category). Fatal at startup; the process must
//!   refuse to serve rather than run with a catalog that cannot satisfy the
//!   random-fallback contract.
//! - `Selection`: an unexpected fault while computing a result set. Reported
//!   to the caller so "service broken" is never mistaken for "no ads".

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the ad-selection service.
#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
    /// The catalog data is unusable (empty catalog, empty category, or a
    /// duplicate category key).
    #[error("Catalog misconfiguration: {reason}")]
    CatalogMisconfiguration { reason: String },

    /// Ad selection failed in a way the handler cannot absorb.
    #[error("Ad selection failed: {context}")]
    Selection { context: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::CatalogMisconfiguration { reason } => {
                Status::failed_precondition(format!("Catalog misconfiguration: {}", reason))
            }
            Error::Selection { context } => {
                Status::internal(format!("Ad selection failed: {}", context))
            }
        }
    }
}
