pub mod api_utils;
pub mod config;
pub mod export;
pub mod icons;
pub mod modal;
