pub mod account;
pub mod employee;
pub mod in_memory;

pub use account::PostgresCredentialStore;
pub use employee::PostgresEmployeeRepository;
pub use in_memory::InMemoryCredentialStore;
pub use in_memory::InMemoryEmployeeRepository;
