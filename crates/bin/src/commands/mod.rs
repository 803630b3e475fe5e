pub mod health;
pub mod role;
pub mod serve;
pub mod user;
