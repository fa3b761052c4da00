//! Build script for compiling protobuf definitions.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_files = ["proto/storefront/v1/users.proto"];
    let includes = ["proto"];

    tonic_build::configure().compile_protos(&proto_files, &includes)?;

    for file in &proto_files {
        println!("cargo:rerun-if-changed={file}");
    }

    Ok(())
}
