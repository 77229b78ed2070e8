pub mod mark;
pub mod menu;
pub mod status;
pub mod web;
