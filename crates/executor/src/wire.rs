//! JSON line framing
//!
//! One [`Request`] per input line, one [`Response`] per output line:
//!
//! ```text
//! > {"id":1,"command":"Begin"}
//! < {"id":1,"result":{"Transaction":"6f1c..."}}
//! > {"id":2,"command":{"RollbackOnly":{}}}
//! < {"id":2,"error":{"code":"NoTransaction","operation":"rollbackOnly"}}
//! ```
//!
//! Each response is flushed before the next line is read. A halt fault ends
//! the process inside [`Executor::execute`], so the request that caused it
//! never gets a response.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::{Command, Error, Executor, Output, Result};

/// A command with a caller-chosen correlation id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Echoed back in the response
    #[serde(default)]
    pub id: Option<u64>,
    /// Command to execute
    pub command: Command,
}

/// Result of one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Id of the request, `None` if the request could not be decoded
    pub id: Option<u64>,
    /// Output on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Output>,
    /// Error on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

impl Response {
    /// Build a response from an execution result
    pub fn from_result(id: Option<u64>, result: Result<Output>) -> Self {
        match result {
            Ok(output) => Response {
                id,
                result: Some(output),
                error: None,
            },
            Err(error) => Response {
                id,
                result: None,
                error: Some(error),
            },
        }
    }
}

/// Counts reported when the input is exhausted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    /// Requests answered with a result
    pub succeeded: u64,
    /// Requests answered with an error (including undecodable lines)
    pub failed: u64,
}

/// Decode one request line
pub fn decode_request(line: &str) -> Result<Request> {
    serde_json::from_str(line).map_err(|e| Error::InvalidInput {
        reason: e.to_string(),
    })
}

/// Encode one response line (without the trailing newline)
pub fn encode_response(response: &Response) -> Result<String> {
    serde_json::to_string(response).map_err(|e| Error::Internal {
        reason: e.to_string(),
    })
}

/// Serve requests from `input` until EOF, writing responses to `output`
///
/// Lines are read as raw bytes; a line that is not UTF-8 or not a valid
/// request is answered with an `InvalidInput` error and serving continues.
/// Only IO errors on `input` or `output` end the loop early.
pub fn serve<R: BufRead, W: Write>(
    executor: &Executor,
    mut input: R,
    mut output: W,
) -> io::Result<ServeSummary> {
    let mut summary = ServeSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match decode_request(line) {
                Ok(request) => {
                    Response::from_result(request.id, executor.execute(request.command))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "undecodable request");
                    Response::from_result(None, Err(e))
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "request is not UTF-8");
                Response::from_result(
                    None,
                    Err(Error::InvalidInput {
                        reason: format!("request is not valid UTF-8: {}", e),
                    }),
                )
            }
        };

        if response.error.is_some() {
            summary.failed += 1;
        } else {
            summary.succeeded += 1;
        }

        let encoded = encode_response(&response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        writeln!(output, "{}", encoded)?;
        output.flush()?;
    }

    Ok(summary)
}
