pub mod error;
pub mod rng;
pub mod runner;
pub mod scene;
pub mod time;
