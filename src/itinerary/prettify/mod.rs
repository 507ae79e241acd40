pub mod assemble;
pub mod codes;
pub mod datetime;
pub mod error;
pub mod io;
pub mod model;
pub mod prompt;

pub use error::{PrettifyError, Result};
