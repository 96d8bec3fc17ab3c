pub mod batch;
pub mod config;
pub mod detect;
pub mod list;
pub mod process;
