// src/ui/views/mod.rs

// One module per route. Each view owns its fetch state, turns key presses
// into effects and draws itself into the content area.

pub mod config_detail;
pub mod configs_table;
pub mod dashboard;
pub mod scans_table;
