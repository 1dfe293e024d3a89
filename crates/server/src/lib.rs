pub mod errors;
pub mod extract;
pub mod response;
pub mod routes;
pub mod startup;

pub use startup::{run_books, run_people};
