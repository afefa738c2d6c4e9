//! Dashboard module
//!
//! Provides the single page of the app: a summary of the current month, the
//! form for adding transactions, the expense breakdown chart and the
//! transaction list.

mod cards;
mod charts;
mod handlers;

pub(crate) use handlers::dashboard_content;
pub use handlers::get_dashboard_page;
