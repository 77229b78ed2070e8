pub mod build_info;
pub mod commands;
pub mod error;
pub mod html;
pub mod model;
pub mod output;
pub mod progress;
pub mod store;
