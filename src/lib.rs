// Library for tests to access modules

pub mod censys_repo;
pub mod collector;
pub mod config;
pub mod format;
pub mod generate;
pub mod models;
pub mod render;
pub mod version;
