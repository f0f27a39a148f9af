mod cli;
mod console;
mod error;
mod logger;
