use std::fs;
use std::path::Path;

const PROTOS: [&str; 3] = [
    "proto/netcore_bridge/v1/event_interceptor.proto",
    "proto/netcore_bridge/v1/state_interceptor.proto",
    "proto/netcore_bridge/v1/entity_platform.proto",
];

fn main() {
    let generated = Path::new("src/generated/netcore_bridge.v1.rs");

    println!("cargo:rerun-if-changed={}", generated.display());
    for proto in PROTOS {
        println!("cargo:rerun-if-changed={}", proto);
    }

    if !generated.exists() {
        panic!(
            "missing generated gRPC source '{}'; commit generated artifacts",
            generated.display()
        );
    }

    let gen_mtime = fs::metadata(generated).and_then(|meta| meta.modified());
    for proto in PROTOS {
        let proto_mtime = fs::metadata(proto).and_then(|meta| meta.modified());
        if let (Ok(proto_mtime), Ok(gen_mtime)) = (proto_mtime, gen_mtime.as_ref()) {
            if proto_mtime > *gen_mtime {
                println!(
                    "cargo:warning=proto '{}' is newer than generated Rust stubs '{}'",
                    proto,
                    generated.display()
                );
            }
        }
    }
}
