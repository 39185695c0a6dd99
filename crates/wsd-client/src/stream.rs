//! Readable image stream returned by a successful render.

use std::fmt;
use std::io::{self, Read};

/// Image bytes from the rendering service.
///
/// The stream owns the underlying HTTP response body. The connection is
/// released when the stream is dropped, whether or not it was read to the
/// end.
pub struct ImageStream {
    reader: Box<dyn Read>,
    content_type: Option<String>,
}

impl ImageStream {
    /// Wrap an arbitrary reader.
    #[must_use]
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
            content_type: None,
        }
    }

    /// Stream over an in-memory buffer.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(io::Cursor::new(bytes.into()))
    }

    /// Attach the `Content-Type` reported by the server.
    #[must_use]
    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }

    /// `Content-Type` of the image response, if the server sent one.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Copy the remaining bytes into `writer`, consuming the stream.
    ///
    /// Returns the number of bytes written.
    pub fn copy_to<W: io::Write + ?Sized>(mut self, writer: &mut W) -> io::Result<u64> {
        io::copy(&mut self.reader, writer)
    }
}

impl Read for ImageStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for ImageStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageStream")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_reads_everything() {
        let mut stream = ImageStream::from_bytes(b"\x89PNG\r\n\x1a\nrest".to_vec());
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"\x89PNG\r\n\x1a\nrest");
    }

    #[test]
    fn test_copy_to_returns_byte_count() {
        let stream = ImageStream::from_bytes(vec![1u8, 2, 3, 4]);
        let mut out = Vec::new();
        let written = stream.copy_to(&mut out).unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_content_type() {
        let stream =
            ImageStream::from_bytes(Vec::new()).with_content_type(Some("image/svg+xml".to_owned()));
        assert_eq!(stream.content_type(), Some("image/svg+xml"));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_copy_to_propagates_read_errors() {
        let stream = ImageStream::from_reader(FailingReader);
        let mut out = Vec::new();
        let err = stream.copy_to(&mut out).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }
}
