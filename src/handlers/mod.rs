pub mod admin;
pub mod cars;
pub mod health;
pub mod inquiry;
pub mod upload;
