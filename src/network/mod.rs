pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub mod stub;

pub use client::ExchangeClient;
pub use error::ClientError;
pub use transport::Timeout;
