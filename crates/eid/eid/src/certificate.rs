//! Reassembly of DER certificates larger than a single read
//!
//! The card stores certificates as a DER SEQUENCE with a two-byte long-form
//! length. The first READ BINARY returns up to 256 bytes; the header gives the
//! total size and the rest is fetched in continuation reads of at most 255
//! bytes.

use bytes::{Bytes, BytesMut};

use crate::constants::{MAX_CONTINUATION_READ, der};

/// Certificate data that does not have the expected framing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Fewer bytes than the DER header
    #[error("Certificate data too short: {0} bytes")]
    Truncated(usize),

    /// First byte is not a SEQUENCE tag
    #[error("Invalid certificate data: unexpected tag {0:#04x}")]
    UnexpectedTag(u8),

    /// Length is not encoded in the two-byte long form
    #[error("Invalid certificate data: unsupported length form {0:#04x}")]
    UnsupportedLengthForm(u8),

    /// The card stopped returning data before the declared length
    #[error("Certificate ended after {received} of {expected} bytes")]
    PrematureEnd {
        /// Declared total length
        expected: usize,
        /// Bytes received so far
        received: usize,
    },

    /// Continuation offset does not fit in READ BINARY parameters
    #[error("Certificate offset {0} out of range")]
    OffsetOutOfRange(usize),
}

/// Total length, header included, declared by a DER header
pub fn parse_der_header(data: &[u8]) -> Result<usize, FormatError> {
    match data {
        [der::SEQUENCE, der::LENGTH_TWO_BYTES, hi, lo, ..] => {
            Ok(usize::from(u16::from_be_bytes([*hi, *lo])) + der::HEADER_LENGTH)
        }
        [der::SEQUENCE, form, ..] if data.len() >= der::HEADER_LENGTH => {
            Err(FormatError::UnsupportedLengthForm(*form))
        }
        [tag, ..] if *tag != der::SEQUENCE => Err(FormatError::UnexpectedTag(*tag)),
        _ => Err(FormatError::Truncated(data.len())),
    }
}

/// Accumulator for a certificate of known length
///
/// The fill level never exceeds the declared length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBuffer {
    data: BytesMut,
    declared: usize,
}

impl CertificateBuffer {
    /// Start a buffer from the first chunk read from the file
    pub fn from_first_chunk(chunk: &[u8]) -> Result<Self, FormatError> {
        let declared = parse_der_header(chunk)?;

        let mut data = BytesMut::with_capacity(declared);
        data.extend_from_slice(&chunk[..chunk.len().min(declared)]);

        Ok(Self { data, declared })
    }

    /// Total length declared by the header
    pub const fn declared_length(&self) -> usize {
        self.declared
    }

    /// Bytes received so far
    pub fn filled(&self) -> usize {
        self.data.len()
    }

    /// Whether the declared length has been reached
    pub fn is_complete(&self) -> bool {
        self.filled() == self.declared
    }

    /// Offset and length of the next continuation read, if one is needed
    pub fn next_read(&self) -> Result<Option<(u16, u16)>, FormatError> {
        if self.is_complete() {
            return Ok(None);
        }

        let offset =
            u16::try_from(self.filled()).map_err(|_| FormatError::OffsetOutOfRange(self.filled()))?;
        let remaining = self.declared - self.filled();
        let length = u16::try_from(remaining)
            .unwrap_or(MAX_CONTINUATION_READ)
            .min(MAX_CONTINUATION_READ);

        Ok(Some((offset, length)))
    }

    /// Append a continuation chunk, returning the number of bytes kept
    ///
    /// Bytes beyond the declared length are dropped. An empty chunk means the
    /// card has nothing more to give.
    pub fn append(&mut self, chunk: &[u8]) -> Result<usize, FormatError> {
        if chunk.is_empty() {
            return Err(FormatError::PrematureEnd {
                expected: self.declared,
                received: self.filled(),
            });
        }

        let kept = chunk.len().min(self.declared - self.filled());
        self.data.extend_from_slice(&chunk[..kept]);
        Ok(kept)
    }

    /// The assembled certificate
    pub fn finish(self) -> Result<Bytes, FormatError> {
        if self.is_complete() {
            Ok(self.data.freeze())
        } else {
            Err(FormatError::PrematureEnd {
                expected: self.declared,
                received: self.filled(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_parse_der_header() {
        assert_eq!(parse_der_header(&hex!("30820254")), Ok(600));
        assert_eq!(parse_der_header(&hex!("308200000000")), Ok(4));
        assert_eq!(parse_der_header(&hex!("3082FFFF")), Ok(0xFFFF + 4));

        assert_eq!(
            parse_der_header(&hex!("31820254")),
            Err(FormatError::UnexpectedTag(0x31))
        );
        assert_eq!(
            parse_der_header(&hex!("30810254")),
            Err(FormatError::UnsupportedLengthForm(0x81))
        );
        assert_eq!(
            parse_der_header(&hex!("30840000")),
            Err(FormatError::UnsupportedLengthForm(0x84))
        );
        assert_eq!(parse_der_header(&hex!("3082")), Err(FormatError::Truncated(2)));
        assert_eq!(parse_der_header(&[]), Err(FormatError::Truncated(0)));
    }

    #[test]
    fn test_next_read_lengths() {
        let mut first = vec![0u8; 256];
        first[..4].copy_from_slice(&hex!("30820254"));

        let mut buffer = CertificateBuffer::from_first_chunk(&first).unwrap();
        assert_eq!(buffer.declared_length(), 600);
        assert_eq!(buffer.next_read(), Ok(Some((256, 255))));

        assert_eq!(buffer.append(&[0u8; 255]), Ok(255));
        assert_eq!(buffer.next_read(), Ok(Some((511, 89))));

        assert_eq!(buffer.append(&[0u8; 89]), Ok(89));
        assert_eq!(buffer.next_read(), Ok(None));
        assert_eq!(buffer.finish().unwrap().len(), 600);
    }

    #[test]
    fn test_short_chunks_advance_by_actual_length() {
        let mut first = vec![0xAAu8; 100];
        first[..4].copy_from_slice(&hex!("30820100"));

        let mut buffer = CertificateBuffer::from_first_chunk(&first).unwrap();
        assert_eq!(buffer.next_read(), Ok(Some((100, 160))));

        assert_eq!(buffer.append(&[0xBB; 60]), Ok(60));
        assert_eq!(buffer.next_read(), Ok(Some((160, 100))));
    }

    #[test]
    fn test_excess_is_truncated() {
        // First chunk longer than the declared certificate
        let mut first = vec![0xEEu8; 256];
        first[..4].copy_from_slice(&hex!("30820010"));
        let buffer = CertificateBuffer::from_first_chunk(&first).unwrap();
        assert!(buffer.is_complete());
        assert_eq!(buffer.finish().unwrap().len(), 20);

        // Continuation chunk longer than what is missing
        let mut first = vec![0u8; 10];
        first[..4].copy_from_slice(&hex!("30820010"));
        let mut buffer = CertificateBuffer::from_first_chunk(&first).unwrap();
        assert_eq!(buffer.append(&[0u8; 50]), Ok(10));
        assert!(buffer.is_complete());
    }

    #[test]
    fn test_empty_chunk_is_premature_end() {
        let mut buffer = CertificateBuffer::from_first_chunk(&hex!("3082001000")).unwrap();
        assert_eq!(
            buffer.append(&[]),
            Err(FormatError::PrematureEnd {
                expected: 20,
                received: 5
            })
        );
        assert!(buffer.finish().is_err());
    }

    #[test]
    fn test_offset_out_of_range() {
        let mut buffer = CertificateBuffer::from_first_chunk(&hex!("3082FFFF")).unwrap();
        let chunk = vec![0u8; 0x10000 - buffer.filled()];
        assert_eq!(buffer.append(&chunk), Ok(chunk.len()));
        assert_eq!(buffer.filled(), 0x10000);
        assert_eq!(
            buffer.next_read(),
            Err(FormatError::OffsetOutOfRange(0x10000))
        );
    }
}
