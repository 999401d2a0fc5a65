//! The stdin/stdout loop.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::protocol::Adapter;

/// Read payload lines from `reader` until EOF, writing one response line
/// per non-blank input line to `writer`.
///
/// Returns the number of lines answered. Only I/O failures end the loop
/// early; bad payloads are answered with an `error` field.
pub async fn serve<R, W>(adapter: &Adapter, reader: R, mut writer: W) -> Result<usize, String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut answered = 0;
    info!("serving host events");
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| format!("failed to read input: {e}"))?
    {
        let Some(response) = adapter.handle_line(&line).await else {
            continue;
        };
        let mut out = response.to_line();
        out.push('\n');
        writer
            .write_all(out.as_bytes())
            .await
            .map_err(|e| format!("failed to write response: {e}"))?;
        writer
            .flush()
            .await
            .map_err(|e| format!("failed to flush output: {e}"))?;
        answered += 1;
    }
    debug!(answered, "input closed");
    Ok(answered)
}
