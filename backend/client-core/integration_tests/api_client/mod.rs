mod api_fetch;
mod auth;
mod tasks;
