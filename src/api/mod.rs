//! Backend HTTP API: wire types and the typed client

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{
    GenerateRequest, GenerateResponse, HistoryEntry, ModelConfig, SetModelParamRequest,
};
