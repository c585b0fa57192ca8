use smart_default::SmartDefault;

use crate::error::Error;

/// How the encoder treats sub-second digits in DATETIME/TIMESTAMP/TIME text
#[derive(Debug, Clone, Copy, PartialEq, Eq, SmartDefault)]
pub enum FractionalSeconds {
    /// Drop microseconds and always emit the 7-byte DATETIME / 8-byte TIME form.
    ///
    /// This matches the bytes produced by the recorder that captured existing test sets.
    #[default]
    Truncate,

    /// Emit the 11-byte DATETIME form when the text carries a fraction,
    /// and the 12-byte TIME form when the microseconds are non-zero.
    Preserve,
}

impl TryFrom<&str> for FractionalSeconds {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "preserve" => Ok(Self::Preserve),
            other => Err(Error::BadConfigError(format!(
                "Invalid fractional seconds mode '{}', expected 'truncate' or 'preserve'",
                other
            ))),
        }
    }
}

/// A configuration for the row codec
///
/// ```rs
/// let mut opts = CodecOpts::default();
/// opts.fractional_seconds = FractionalSeconds::try_from("preserve")?;
/// ```
#[derive(Debug, Clone, SmartDefault)]
pub struct CodecOpts {
    /// Encoding of sub-second precision in temporal values
    pub fractional_seconds: FractionalSeconds,

    /// Log a warning when a decoded row's header `payload_length` does not match
    /// the number of bytes the row body actually occupied
    #[default = false]
    pub check_payload_length: bool,
}
