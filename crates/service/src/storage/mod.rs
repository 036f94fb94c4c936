pub mod json_doc_store;

pub use json_doc_store::JsonDocStore;
