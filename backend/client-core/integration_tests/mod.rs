mod api_client;
mod helpers;
