pub mod health;
pub mod middleware;
pub mod pagination;
pub mod response;
pub mod timefmt;
pub mod tracing;
