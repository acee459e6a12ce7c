pub mod clock;
pub mod http_executor;
pub mod token_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use http_executor::HttpExecutor;
pub use token_store::TokenStore;
