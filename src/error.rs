use crate::compat::String;

/// Errors surfaced by address construction, navigation and listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input is not a valid absolute URL
    InvalidUrl,
    /// Two addresses that must share an origin do not
    CrossOrigin,
    /// Invalid percent encoding
    InvalidPercentEncoding,
    /// An ambient call was made before a navigator was installed
    NoAmbientNavigator,
    /// A navigation listener failed; the message comes from the listener
    Listener(String),
}

impl Error {
    /// Build a listener failure from any message
    pub fn listener(message: impl Into<String>) -> Self {
        Self::Listener(message.into())
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidUrl => "Invalid URL",
            Self::CrossOrigin => "URLs do not share an origin",
            Self::InvalidPercentEncoding => "Invalid percent encoding",
            Self::NoAmbientNavigator => "No ambient navigator installed",
            Self::Listener(message) => return write!(f, "Listener failed: {message}"),
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

impl From<url::ParseError> for Error {
    fn from(_: url::ParseError) -> Self {
        Self::InvalidUrl
    }
}

/// Result type for address and navigation operations
pub type Result<T> = core::result::Result<T, Error>;
