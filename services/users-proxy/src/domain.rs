// Domain layer modules
pub mod proxy_message;
pub mod user;

// Re-exports
pub use proxy_message::{InboundRequest, OutboundResponse};
pub use user::{CreateUserPayload, UserData, UserRecord};
