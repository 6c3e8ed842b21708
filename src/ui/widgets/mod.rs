// src/ui/widgets/mod.rs

// Reusable drawing blocks shared by the views.

pub mod counter;
pub mod empty_display;
pub mod expandable;
pub mod footer;
pub mod header;
pub mod loader;
pub mod log_view;
pub mod modal_popup;
pub mod table;
