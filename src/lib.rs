pub mod alphabet;
pub mod api;
pub mod config;
pub mod error;
pub mod machine;
pub mod optimizer;
pub mod scorer;
