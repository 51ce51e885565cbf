//! Session verification adapters.

mod remote;
mod fixed;

pub use fixed::StaticSessionVerifier;
pub use remote::RemoteSessionVerifier;
