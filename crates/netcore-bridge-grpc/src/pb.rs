pub mod netcore_bridge {
    pub mod v1 {
        include!("generated/netcore_bridge.v1.rs");
    }
}
