pub mod auth;
pub mod health;
pub mod pages;
pub mod session;
pub mod stories;
