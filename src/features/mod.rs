pub mod cleanup;
pub mod pages;
pub mod reports;
pub mod shifts;
