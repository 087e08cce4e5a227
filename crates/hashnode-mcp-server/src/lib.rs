pub mod errors;
pub mod format;
pub mod graphql;
mod json_schema;
pub mod model;
pub mod queries;
pub mod server;
pub mod server_handler;
pub mod tools;
