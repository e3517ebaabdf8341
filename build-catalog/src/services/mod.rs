pub mod catalog;
pub mod changelog;
