use std::any::Any;

use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;

/// Build the `CatchPanicLayer` handler.
///
/// A panicking handler becomes an `INTERNAL_SERVER_ERROR` response; the
/// panic message reaches the client only when `expose_details` is set.
pub fn panic_handler(
    expose_details: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |panic: Box<dyn Any + Send + 'static>| {
        let message = panic_message(panic.as_ref());

        tracing::error!(panic = %message, "Request handler panicked");

        ApiError::internal("Internal server error", message, expose_details).into_response()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
