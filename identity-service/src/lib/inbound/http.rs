pub mod handlers;
pub mod middleware;
pub mod recovery;
pub mod router;
