pub mod reports;
pub mod root;
