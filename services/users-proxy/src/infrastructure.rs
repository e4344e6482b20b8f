// Infrastructure layer modules
pub mod lambda_http_adapter;
pub mod logging;
pub mod users_api;

// Re-exports
pub use lambda_http_adapter::{to_http_response, to_inbound_request};
pub use logging::init_logging;
pub use users_api::{
    ReqwestUsersApi, UsersApi, UsersApiConfig, UsersApiConfigError, UsersApiError,
};
