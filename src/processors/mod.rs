pub mod filter_engine;
pub mod label_enricher;
pub mod quality_report;

pub use filter_engine::{filter, FilteredView, Selection, SelectionDomain};
pub use label_enricher::{enrich, Enrichment, LabelEnricher, SeasonCodePolicy};
pub use quality_report::{DataQualityReport, RejectedRow, RejectionReason};
