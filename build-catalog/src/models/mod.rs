pub mod build;
pub mod device;
pub mod filename;
