//! Umbrella crate for the wagemap workspace. Re-exports `wagemap-core` so the
//! demos under `demos/` can `use wagemap_rs::...`.

pub use wagemap_core::*;
