pub mod cli;
pub mod scenarios;
pub mod script;

// Re-export the container crate for script users
pub use simple_vector;
