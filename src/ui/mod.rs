//! Dashboard widgets: panels, charts, and the raw-data table.

pub mod charts;
pub mod panels;
pub mod table;
