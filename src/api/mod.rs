//! Remote task service client
//!
//! - [`TaskApi`] - the port the view controller talks to
//! - [`HttpTaskClient`] - `reqwest` implementation against the real service
//! - [`ClientError`] / [`RequestError`] - the single normalized error shape
//!
//! ## Error normalization
//!
//! A failed create/update/delete uses the first of: `detail[0].msg`,
//! `message`, or `"Failed to <operation>: <status>"`. A failed list always
//! uses the status message. Transport failures become
//! `"Network error: <cause>"`.

mod client;
mod error;
mod port;
mod types;

pub use client::HttpTaskClient;
pub use error::{ClientError, Operation, RequestError};
pub use port::TaskApi;
pub use types::{
    CREATE_PATH, DELETE_PATH, EndpointProbe, ErrorBody, KNOWN_PATHS, LIST_PATH,
    UPDATE_PATH, error_message, id_url,
};
