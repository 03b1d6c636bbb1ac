pub mod data_manager;
pub mod formatter;
pub mod gameapi;
