mod commands;
mod context;
