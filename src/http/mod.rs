pub mod client;

pub use client::WebClient;
