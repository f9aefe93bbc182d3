//! HTTP API layer: handlers, DTOs, middleware, and route configuration.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
