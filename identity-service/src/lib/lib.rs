pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod telemetry;

pub use domain::account;
pub use domain::employee;
pub use outbound::repositories;
