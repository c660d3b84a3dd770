pub mod client;
pub mod query;
pub mod transport;

pub use self::client::{Session, SessionClient};
pub use self::query::{DateMode, Query, Request};
pub use self::transport::{HttpTransport, Transport};
