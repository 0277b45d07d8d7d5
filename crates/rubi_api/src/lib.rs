//! Types for communication between the server and its clients.

pub mod request;
pub mod response;
