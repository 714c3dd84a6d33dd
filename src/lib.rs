pub mod app;
mod dom;
pub mod fetcher;
pub mod model;
pub mod service;
