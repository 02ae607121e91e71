// extensions/mod.rs
//
// Scene hierarchy kept outside the flat node store.
// Nodes hold world transforms; parents, children and local offsets live here.

pub mod transform;

pub use transform::{Ancestors, LocalTransform, TransformGraph};
