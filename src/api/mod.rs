// HTTP routes, handlers and page rendering

pub mod assistant;
pub mod auth;
pub mod health;
pub mod pages;
pub mod predictions;
pub mod routes;
pub mod views;
