pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::runtime::{SessionHandle, run_with_config, spawn_session};
