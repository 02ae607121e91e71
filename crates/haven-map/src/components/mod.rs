pub mod label;
pub mod mesh;
pub mod node;
