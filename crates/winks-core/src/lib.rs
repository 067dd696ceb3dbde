pub mod config;
pub mod logging;

pub mod library;
pub mod link_meta;
pub mod pin;
pub mod store;
pub mod url_model;
pub mod vocabulary;
