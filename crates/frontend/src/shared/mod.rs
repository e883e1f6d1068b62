pub mod config;
pub mod data_uri;
pub mod icons;
pub mod page_frame;
