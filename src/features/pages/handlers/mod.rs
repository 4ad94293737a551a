pub mod page_handler;

pub use page_handler::{index_page, reports_page};
