use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle of an image kept in the image cache.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Hash, Debug)]
#[serde(transparent)]
pub struct ImageToken(String);

impl ImageToken {
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
