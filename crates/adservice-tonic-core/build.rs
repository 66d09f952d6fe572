/// Builds the gRPC client and server code for the `adservice.proto` definition
/// using `tonic-prost-build`.
///
/// Besides the message and service bindings, this emits an encoded file
/// descriptor set into `OUT_DIR` so the server can register the contract with
/// the gRPC reflection service.
///
/// # Panics
///
/// Panics if code generation fails, which aborts the build with the protoc
/// error attached.
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("adservice_descriptor.bin");

    tonic_prost_build::configure()
        .file_descriptor_set_path(&descriptor_path)
        .compile_protos(&["proto/adservice.proto"], &["proto"])
        .unwrap();
}
