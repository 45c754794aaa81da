pub mod dispatch;
mod error;
mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use error::DispatchError;
pub use server::{Server, router, run};
