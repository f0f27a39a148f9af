mod error_detail;
mod token_store;
mod ui;
