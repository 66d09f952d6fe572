#![doc = include_str!("../README.md")]

mod common;
pub use common::*;

/// Generated protobuf/gRPC bindings for the `adservice` package.
pub mod proto {
    tonic::include_proto!("adservice");

    /// Encoded file descriptor set, registered with the reflection service.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("adservice_descriptor");
}
