pub mod routes;
pub mod server;

pub use routes::{create_router, AppError, AppState};
pub use server::{build_app, WebServer};
