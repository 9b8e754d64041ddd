pub mod analytics;
pub mod buildings;
pub mod confirmations;
pub mod connection;
pub mod help;
pub mod reports;

pub use connection::Database;
