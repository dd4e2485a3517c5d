use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Feed stdin lines to `on_line` until EOF or until it returns false
pub async fn watch_stdin<F, Fut>(on_line: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    watch_lines(BufReader::new(tokio::io::stdin()), on_line).await
}

/// Lines are handled one at a time, in input order
pub async fn watch_lines<R, F, Fut>(reader: R, mut on_line: F) -> Result<(), anyhow::Error>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if !on_line(line).await {
            tracing::debug!("Line handler asked to stop");
            return Ok(());
        }
    }
    tracing::debug!("Input closed");
    Ok(())
}
