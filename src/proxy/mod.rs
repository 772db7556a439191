// proxy module - HTTP front door and LCU gateway

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod upstream;

pub use server::AxumServer;
