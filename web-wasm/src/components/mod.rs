//! UIコンポーネント

pub mod header;
pub mod result_panel;
pub mod submit_button;
pub mod upload_area;
