pub mod cli;
pub mod commands;
pub mod console;
pub mod context;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;
