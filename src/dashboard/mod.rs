pub mod report;
pub mod view;

pub use report::text_report;
pub use view::{render, DashboardView, PreviewRow, ScatterPoint, SelectionEcho};
