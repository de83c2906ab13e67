//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Source file missing or unreadable.
#[derive(Debug)]
pub struct DataUnavailable(pub String);

/// Source file readable but not a valid dataset.
#[derive(Debug)]
pub struct DataMalformed(pub String);

/// Invalid command line argument.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

impl fmt::Display for DataUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "data unavailable: {}", self.0)
    }
}

impl fmt::Display for DataMalformed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "data malformed: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl error::Error for DataUnavailable {}

impl error::Error for DataMalformed {}

impl error::Error for InvalidArgument {}

/// A helper for constructing [DataUnavailable].
pub fn data_unavailable(s: String) -> Box<dyn error::Error> {
    DataUnavailable(s).into()
}

/// A helper for constructing [DataMalformed].
pub fn data_malformed(s: String) -> Box<dyn error::Error> {
    DataMalformed(s).into()
}

/// A helper for constructing [DataMalformed].
pub fn data_malformed_ref(s: &str) -> Box<dyn error::Error> {
    DataMalformed(s.to_owned()).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument_ref(s: &str) -> Box<dyn error::Error> {
    InvalidArgument(s.to_owned()).into()
}
