pub mod config;
pub mod logging;

pub mod checksum;
pub mod compare;
pub mod error;
pub mod fetch;
pub mod inputs;
pub mod storage;
pub mod strategy;
pub mod url_model;
