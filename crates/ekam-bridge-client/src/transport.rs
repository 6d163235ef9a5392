//! Header-framed message channel over the server's stdio.
//!
//! Language servers frame each message with a `Content-Length` header:
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! <payload>
//! ```

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::process::{ChildStdin, ChildStdout};

use crate::error::TransportError;

/// Reads and writes `Content-Length` framed messages over a byte stream.
///
/// Generic over the underlying reader and writer so tests can drive it with
/// in-memory buffers instead of process pipes.
pub struct FramedTransport<R, W: Write> {
    reader: BufReader<R>,
    writer: BufWriter<W>,
}

/// Transport bound to a spawned server's stdio pipes.
pub type StdioTransport = FramedTransport<ChildStdout, ChildStdin>;

impl<R: Read, W: Write> FramedTransport<R, W> {
    /// Wraps a reader/writer pair in the framing protocol.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
        }
    }

    /// Sends one framed message.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] when writing to the channel fails.
    pub fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        write!(self.writer, "Content-Length: {}\r\n\r\n", payload.len())?;
        self.writer.write_all(payload)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Receives one framed message, blocking until it is complete.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::MissingContentLength`] when the headers end
    /// without a length, [`TransportError::InvalidHeader`] when the length is
    /// unparseable, and [`TransportError::Io`] on channel failure or EOF.
    pub fn receive(&mut self) -> Result<Vec<u8>, TransportError> {
        let length = self.read_headers()?;
        let mut payload = vec![0u8; length];
        self.reader.read_exact(&mut payload)?;
        Ok(payload)
    }

    fn read_headers(&mut self) -> Result<usize, TransportError> {
        let mut content_length = None;

        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "channel closed while reading headers",
                )));
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                // Blank line ends the header block.
                break;
            }

            if let Some(value) = trimmed.strip_prefix("Content-Length:") {
                content_length =
                    Some(value.trim().parse().map_err(|_| TransportError::InvalidHeader)?);
            }
            // Other headers (e.g. Content-Type) are ignored.
        }

        content_length.ok_or(TransportError::MissingContentLength)
    }

    #[cfg(test)]
    fn into_writer(self) -> W
    where
        W: std::fmt::Debug,
    {
        self.writer.into_inner().expect("writer flush failed")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    fn sending() -> FramedTransport<Cursor<Vec<u8>>, Vec<u8>> {
        FramedTransport::new(Cursor::new(Vec::new()), Vec::new())
    }

    fn receiving(input: &[u8]) -> FramedTransport<Cursor<Vec<u8>>, Vec<u8>> {
        FramedTransport::new(Cursor::new(input.to_vec()), Vec::new())
    }

    #[rstest]
    fn frames_outgoing_messages() {
        let mut transport = sending();

        transport.send(b"test payload").expect("send failed");

        let written = transport.into_writer();
        assert_eq!(written, b"Content-Length: 12\r\n\r\ntest payload");
    }

    #[rstest]
    fn frames_empty_messages() {
        let mut transport = sending();

        transport.send(b"").expect("send failed");

        assert_eq!(transport.into_writer(), b"Content-Length: 0\r\n\r\n");
    }

    #[rstest]
    fn reads_framed_message() {
        let mut transport = receiving(b"Content-Length: 5\r\n\r\nhello");

        assert_eq!(transport.receive().expect("receive failed"), b"hello");
    }

    #[rstest]
    fn skips_extra_headers() {
        let mut transport =
            receiving(b"Content-Length: 4\r\nContent-Type: application/json\r\n\r\ntest");

        assert_eq!(transport.receive().expect("receive failed"), b"test");
    }

    #[rstest]
    fn accepts_header_without_space_after_colon() {
        let mut transport = receiving(b"Content-Length:4\r\n\r\ntest");

        assert_eq!(transport.receive().expect("receive failed"), b"test");
    }

    #[rstest]
    fn rejects_missing_content_length() {
        let mut transport = receiving(b"Content-Type: application/json\r\n\r\ntest");

        assert!(matches!(
            transport.receive(),
            Err(TransportError::MissingContentLength)
        ));
    }

    #[rstest]
    fn rejects_unparseable_length() {
        let mut transport = receiving(b"Content-Length: twelve\r\n\r\ntest");

        assert!(matches!(
            transport.receive(),
            Err(TransportError::InvalidHeader)
        ));
    }

    #[rstest]
    fn reports_eof_inside_headers() {
        let mut transport = receiving(b"Content-Length: 10");

        assert!(matches!(transport.receive(), Err(TransportError::Io(_))));
    }

    #[rstest]
    fn reports_eof_inside_payload() {
        let mut transport = receiving(b"Content-Length: 10\r\n\r\nshort");

        assert!(matches!(transport.receive(), Err(TransportError::Io(_))));
    }

    #[rstest]
    fn sent_frames_can_be_received_back() {
        let payload = br#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#;
        let mut out = sending();
        out.send(payload).expect("send failed");

        let mut back = receiving(&out.into_writer());

        assert_eq!(back.receive().expect("receive failed"), payload);
    }
}
