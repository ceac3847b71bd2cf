//! [`Error`], [`ErrorKind`] and [`Result`].

mod http_error;
mod pg_error;
mod service_error;

pub use http_error::{Error, ErrorKind, Result};
