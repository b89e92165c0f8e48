// Dashboard server: page shell, routes and handlers for the executors view

pub mod handlers;
pub mod routes;
pub mod state;
pub mod templates;
