pub mod document_store;
pub mod http_client;
