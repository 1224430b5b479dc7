//! Request middleware: CORS, request logging, error rendering and panic recovery.

pub mod cors;
pub mod error;
pub mod logging;

pub use cors::{CorsPolicy, cors};
pub use error::{
    ErrorOutcome, PanicError, PanicRecord, handle_errors, panic_message, panic_response,
    render_error,
};
pub use logging::log_requests;
