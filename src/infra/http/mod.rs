pub mod screener_client;
