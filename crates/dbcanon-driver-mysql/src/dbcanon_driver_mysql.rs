//! MySQL/MariaDB query executor for dbcanon

mod connection;
mod value;

pub use connection::MySqlExecutor;
