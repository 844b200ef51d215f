mod error_handler;

pub use error_handler::log_server_errors;
