pub mod cards;
pub mod connection;
pub mod duels;
pub mod models;
pub mod participants;
pub mod profiles;
pub mod prompts;
pub mod setup;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
