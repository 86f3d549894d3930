pub mod catalog;
pub mod codec;
pub mod dashboard;
pub mod inquiry;
pub mod sync;

pub use catalog::CatalogService;
pub use dashboard::DashboardService;
pub use inquiry::InquiryService;
pub use sync::{CatalogSync, SyncReport};
