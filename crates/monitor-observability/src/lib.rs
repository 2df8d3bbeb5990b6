mod chain;
mod cycle;
mod http;

pub use chain::*;
pub use cycle::*;
pub use http::*;
