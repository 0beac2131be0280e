pub mod client;
pub mod sync_report;

pub use client::Client;
pub use sync_report::SyncReport;
