//! HTTP front end

mod handler;
mod listener;
mod pages;

pub use handler::{router, DispatchResponse, LoginForm, OpenAppRequest};
pub use listener::WebServer;
