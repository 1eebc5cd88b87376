//! IPFS `add` response decoding
//!
//! The gateway streams newline-delimited JSON. Each line is a completed item
//! (`Name`, `Hash`, `Size`), a byte-count tick (`Name`, `Bytes`), or an error
//! (`Message`, `Code`, `Type: "error"`).

use serde::Deserialize;

use crate::domain::entities::content_id::ContentId;
use crate::domain::entities::progress_event::ProgressEvent;
use crate::domain::errors::UploadError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddLine {
    #[serde(default)]
    name: String,
    hash: Option<String>,
    bytes: Option<u64>,
    message: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
}

/// One decoded line of the `add` output
#[derive(Debug, PartialEq, Eq)]
pub enum AddOutput {
    Event(ProgressEvent),
    Error(String),
}

/// Decode a single NDJSON line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<AddOutput>, UploadError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let parsed: AddLine = serde_json::from_str(line)
        .map_err(|e| UploadError::MalformedResponse(format!("{}: {}", e, line)))?;

    if parsed.kind.as_deref() == Some("error") || (parsed.hash.is_none() && parsed.message.is_some()) {
        let message = parsed.message.unwrap_or_else(|| "unknown error".to_string());
        return Ok(Some(AddOutput::Error(message)));
    }

    if let Some(hash) = parsed.hash {
        let content_id: ContentId = hash
            .parse()
            .map_err(|e| UploadError::MalformedResponse(format!("invalid CID {:?}: {}", hash, e)))?;
        return Ok(Some(AddOutput::Event(ProgressEvent::NamedCompletion {
            name: parsed.name,
            content_id,
        })));
    }

    if let Some(bytes) = parsed.bytes {
        return Ok(Some(AddOutput::Event(ProgressEvent::Tick {
            name: parsed.name,
            bytes,
        })));
    }

    Err(UploadError::MalformedResponse(format!(
        "unrecognised add output: {}",
        line
    )))
}

/// Build the error for a non-2xx response.
///
/// The API usually answers with `{"Message": ..., "Code": ..., "Type": "error"}`,
/// but hosted gateways may reply with plain text (e.g. on a bad project id).
pub fn remote_error(status: u16, body: &str) -> UploadError {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(rename = "Message")]
        message: String,
    }

    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    };

    UploadError::Remote {
        status: Some(status),
        message,
    }
}

/// Splits a chunked byte stream into complete lines
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    /// Append a chunk and return every line it completed
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>, UploadError> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let rest = self.pending.split_off(pos + 1);
            let line = std::mem::replace(&mut self.pending, rest);
            lines.push(decode_utf8(line)?);
        }
        Ok(lines)
    }

    /// Flush a trailing line that was not newline-terminated
    pub fn finish(self) -> Result<Option<String>, UploadError> {
        if self.pending.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode_utf8(self.pending).map(Some)
    }
}

fn decode_utf8(bytes: Vec<u8>) -> Result<String, UploadError> {
    String::from_utf8(bytes)
        .map_err(|e| UploadError::MalformedResponse(format!("response is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

    #[test]
    fn test_parse_completion_line() {
        let line = format!(r#"{{"Name":"example.txt","Hash":"{}","Size":"19"}}"#, CID);
        let output = parse_line(&line).unwrap().unwrap();

        match output {
            AddOutput::Event(ProgressEvent::NamedCompletion { name, content_id }) => {
                assert_eq!(name, "example.txt");
                assert_eq!(content_id.to_string(), CID);
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tick_line() {
        let output = parse_line(r#"{"Name":"example.txt","Bytes":262144}"#)
            .unwrap()
            .unwrap();

        assert_eq!(
            output,
            AddOutput::Event(ProgressEvent::Tick {
                name: "example.txt".to_string(),
                bytes: 262144,
            })
        );
    }

    #[test]
    fn test_parse_tick_without_name() {
        let output = parse_line(r#"{"Bytes":10}"#).unwrap().unwrap();
        assert_eq!(
            output,
            AddOutput::Event(ProgressEvent::Tick {
                name: String::new(),
                bytes: 10,
            })
        );
    }

    #[test]
    fn test_parse_error_line() {
        let output = parse_line(r#"{"Message":"pin: context canceled","Code":0,"Type":"error"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(output, AddOutput::Error("pin: context canceled".to_string()));
    }

    #[test]
    fn test_parse_blank_line() {
        assert!(parse_line("   ").unwrap().is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_line("{not json");
        assert!(matches!(result, Err(UploadError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_invalid_cid() {
        let result = parse_line(r#"{"Name":"a","Hash":"bafy...abc"}"#);
        assert!(matches!(result, Err(UploadError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_unknown_shape() {
        let result = parse_line(r#"{"Name":"a"}"#);
        assert!(matches!(result, Err(UploadError::MalformedResponse(_))));
    }

    #[test]
    fn test_remote_error_json_body() {
        let err = remote_error(500, r#"{"Message":"file argument 'path' is required","Code":1,"Type":"error"}"#);
        match err {
            UploadError::Remote { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "file argument 'path' is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_remote_error_plain_body() {
        let err = remote_error(401, "invalid project id\n");
        assert_eq!(err.to_string(), "gateway returned 401: invalid project id");
    }

    #[test]
    fn test_remote_error_empty_body() {
        let err = remote_error(502, "");
        assert_eq!(err.to_string(), "gateway returned 502: empty response body");
    }

    #[test]
    fn test_line_buffer_split_across_chunks() {
        let mut buffer = LineBuffer::default();

        assert!(buffer.push(b"{\"Name\":\"a\",").unwrap().is_empty());
        let lines = buffer.push(b"\"Bytes\":1}\n{\"Name\"").unwrap();
        assert_eq!(lines, vec!["{\"Name\":\"a\",\"Bytes\":1}\n".to_string()]);

        let lines = buffer.push(b":\"b\",\"Bytes\":2}\n\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert!(buffer.finish().unwrap().is_none());
    }

    #[test]
    fn test_line_buffer_trailing_line() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(b"{\"Bytes\":1}").unwrap().is_empty());
        assert_eq!(buffer.finish().unwrap(), Some("{\"Bytes\":1}".to_string()));
    }
}
