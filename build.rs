fn main() -> Result<(), Box<dyn std::error::Error>> {
    // protoc is not installed in this environment; fall back to the vendored
    // binary so tonic-build can locate a protoc compiler.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }
    tonic_build::compile_protos("proto/minidfs.proto")?;
    Ok(())
}
