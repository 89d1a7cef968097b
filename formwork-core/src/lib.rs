// Core transport types for the Formwork validation toolkit
// Requests and responses here are the boundary the validator talks to; the
// actual HTTP server is somebody else's job.

pub mod error;
pub mod form;
pub mod http;
pub mod mode;

pub use error::*;
pub use form::*;
pub use http::*;
pub use mode::*;
