//! Line-delimited JSON-RPC over stdin/stdout.
//!
//! One message per line in each direction. Every message is handled on its
//! own task; responses go through a channel to a single writer so output
//! lines never interleave.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::mcp::{McpState, handle_message};

/// Serve MCP on the process's stdin and stdout until stdin closes.
pub async fn serve_stdio(state: Arc<McpState>) -> std::io::Result<()> {
    info!("Serving MCP over stdio");
    serve_lines(state, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve MCP over any line-oriented reader and writer.
///
/// Returns once the reader is exhausted and every in-flight response has
/// been written.
pub async fn serve_lines<R, W>(state: Arc<McpState>, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer_task = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let state = state.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let Some(response) = handle_message(&state, &line).await else {
                return;
            };
            match serde_json::to_string(&response) {
                Ok(json) => {
                    // Only fails once the writer is gone, and then nobody is listening.
                    let _ = tx.send(json);
                }
                Err(e) => error!(error = %e, "Failed to serialize MCP response"),
            }
        });
    }

    info!("stdin closed, draining responses");
    drop(tx);
    writer_task.await.map_err(std::io::Error::other)?
}
