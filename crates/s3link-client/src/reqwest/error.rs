//! Mapping of reqwest failures onto the client error taxonomy.

use crate::{Error, ErrorKind};

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::timeout()
                .with_message(err.to_string())
                .with_source(err)
        } else if err.is_connect() {
            Error::network_error()
                .with_message("Connection failed")
                .with_source(err)
        } else if err.is_decode() {
            Error::serialization()
                .with_message(err.to_string())
                .with_source(err)
        } else if err.is_builder() {
            Error::new(ErrorKind::InvalidInput)
                .with_message(err.to_string())
                .with_source(err)
        } else {
            Error::network_error()
                .with_message(err.to_string())
                .with_source(err)
        }
    }
}
