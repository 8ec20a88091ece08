//! Stdio transport: newline-delimited JSON requests on stdin, one response
//! line per request on stdout. Logs go to stderr so the pipe stays clean.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use org_graph_core::error::ErrorKind;

use crate::handlers::Handlers;
use crate::protocol::{AtpRequest, AtpResponse};

/// Upper bound on one request line. A client that streams an unbounded
/// line would otherwise grow the buffer without limit.
pub const MAX_LINE_BYTES: usize = 10 * 1024 * 1024;

/// Read one newline-terminated line with a size cap. Returns the number of
/// bytes consumed; zero means EOF.
pub async fn read_line_bounded<R>(
    reader: &mut R,
    line: &mut String,
    max_bytes: usize,
) -> std::io::Result<usize>
where
    R: AsyncBufReadExt + AsyncReadExt + Unpin,
{
    let mut buf = Vec::new();
    let consumed = reader
        .take(max_bytes as u64 + 1)
        .read_until(b'\n', &mut buf)
        .await?;
    if consumed > max_bytes {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("request line exceeds {max_bytes} bytes"),
        ));
    }
    *line = String::from_utf8_lossy(&buf).into_owned();
    Ok(consumed)
}

/// Serve requests from stdin until EOF.
pub async fn run_stdio(handlers: Arc<Handlers>) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut writer = tokio::io::BufWriter::new(stdout);
    let mut line = String::new();

    info!("ATP server ready on stdio");
    loop {
        line.clear();
        let bytes_read = match read_line_bounded(&mut reader, &mut line, MAX_LINE_BYTES).await {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                // Oversized line: reply with an error and drop the stream;
                // the framing is unrecoverable mid-line.
                let response =
                    AtpResponse::failure(ErrorKind::Validation, "Request line too large");
                write_response(&mut writer, &response).await?;
                error!("oversized request line, closing transport");
                break;
            }
            Err(e) => {
                error!(error = %e, "stdin read failed");
                return Err(e.into());
            }
        };
        if bytes_read == 0 {
            info!("stdin closed, shutting down");
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        debug!(request = trimmed, "received");

        let response = match serde_json::from_str::<AtpRequest>(trimmed) {
            Ok(request) => handlers.dispatch(request),
            Err(e) => AtpResponse::failure(ErrorKind::Validation, format!("Malformed request: {e}")),
        };
        write_response(&mut writer, &response).await?;
    }
    Ok(())
}

async fn write_response<W>(writer: &mut W, response: &AtpResponse) -> anyhow::Result<()>
where
    W: AsyncWriteExt + Unpin,
{
    let serialised = serde_json::to_string(response)?;
    writer.write_all(serialised.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_reader_accepts_normal_lines() {
        let data = b"{\"tool\": \"get_statistics\"}\n".to_vec();
        let mut reader = BufReader::new(std::io::Cursor::new(data));
        let mut line = String::new();
        let n = read_line_bounded(&mut reader, &mut line, 1024).await.unwrap();
        assert!(n > 0);
        assert!(line.contains("get_statistics"));
    }

    #[tokio::test]
    async fn bounded_reader_rejects_oversized_lines() {
        let data = vec![b'x'; 2048];
        let mut reader = BufReader::new(std::io::Cursor::new(data));
        let mut line = String::new();
        let err = read_line_bounded(&mut reader, &mut line, 1024)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn bounded_reader_signals_eof_with_zero() {
        let mut reader = BufReader::new(std::io::Cursor::new(Vec::new()));
        let mut line = String::new();
        let n = read_line_bounded(&mut reader, &mut line, 1024).await.unwrap();
        assert_eq!(n, 0);
    }
}
