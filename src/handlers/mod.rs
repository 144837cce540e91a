pub mod ping;
pub mod user;
