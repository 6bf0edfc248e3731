/// Failures raised by the link pipelines.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LinkError {
    /// A logarithm or power computation was given a value outside its domain.
    #[error("domain error: {0}")]
    Domain(String),
    #[error("length mismatch: transmitted {tx} bits, received {rx} bits")]
    LengthMismatch { tx: usize, rx: usize },
    /// Manchester frames are built from bit pairs.
    #[error("malformed frame: {len} samples cannot be split into pairs")]
    MalformedFrame { len: usize },
    #[error("invalid codeword {pair:?} at pair {index}")]
    InvalidCodeWord { index: usize, pair: (u8, u8) },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            LinkError::LengthMismatch { tx: 4, rx: 3 }.to_string(),
            "length mismatch: transmitted 4 bits, received 3 bits"
        );
        assert_eq!(
            LinkError::MalformedFrame { len: 5 }.to_string(),
            "malformed frame: 5 samples cannot be split into pairs"
        );
        assert_eq!(
            LinkError::InvalidCodeWord {
                index: 2,
                pair: (1, 1)
            }
            .to_string(),
            "invalid codeword (1, 1) at pair 2"
        );
    }
}
