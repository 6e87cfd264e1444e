//! Shared HTTP client

mod client;

pub use client::{decode_json, HttpClient, HttpClientBuilder};
