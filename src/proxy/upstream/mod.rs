pub mod client;

pub use client::{LcuClient, UpstreamBody};
