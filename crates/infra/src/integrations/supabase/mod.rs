//! Supabase auth integration

pub mod client;

pub use client::SupabaseAuthClient;
