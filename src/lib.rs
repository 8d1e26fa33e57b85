//! Backend of the marketing website: contact form submissions, newsletter
//! subscriptions and the admin API that lists them.

pub mod app;
pub mod auth;
pub mod domain;
pub mod routes;
pub mod store;
