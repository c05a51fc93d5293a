mod handler;
mod io;
mod protocol;

use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::{
    cli::Args,
    error::{AppError, AppResult},
};

pub use handler::BridgeHandler;
pub use io::{Line, NdjsonIo};
pub use protocol::{BridgeRequest, BridgeResponse, PROTOCOL_VERSION};

pub fn run(args: Args) -> AppResult<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    rt.block_on(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut io = NdjsonIo::new(stdin, tokio::io::stdout());
        let handler = BridgeHandler::new(args.resolver());
        tracing::info!(default_limit = %args.default_limit, "bridge listening on stdio");
        serve(&mut io, &handler).await
    })
}

/// Answers one request per line until EOF.
pub async fn serve<R, W>(io: &mut NdjsonIo<R, W>, handler: &BridgeHandler) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let Some(line) = io.read_line().await? else { break };
        let line = match line {
            Line::Blank => continue,
            Line::Text(s) => s,
            Line::NotUtf8(e) => {
                tracing::warn!(error = %e, "request line is not valid utf-8");
                io.protocol_error(String::new(), "INVALID_REQUEST", e.to_string()).await?;
                continue;
            }
        };

        let req: BridgeRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "malformed request line");
                // No usable id; still answer so the client can resync.
                io.protocol_error(String::new(), "INVALID_REQUEST", e.to_string()).await?;
                continue;
            }
        };

        let resp = handler.handle(req);
        io.write_json_line(&resp).await?;
    }

    Ok(())
}
