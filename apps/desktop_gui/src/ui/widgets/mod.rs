pub mod pending_indicator;
pub mod upload_panel;
