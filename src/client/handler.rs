use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::client::{Client, ClientRegistry};
use crate::config::AppConfig;
use crate::protocol::responses::{self, format_response};
use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::store::CredentialStore;

/// Handles one client session using the Tokio async runtime.
///
/// - Greets the client, then reads one command per line.
/// - Dispatches commands using `handle_command`.
/// - Mirrors the logged-in username into the shared `registry`.
pub async fn handle_client(
    stream: TcpStream,
    client_addr: SocketAddr,
    registry: Arc<Mutex<ClientRegistry>>,
    store: CredentialStore,
    config: Arc<AppConfig>,
) -> Result<(), std::io::Error> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();
    let mut client = Client::default();
    let max_length = config.server.max_command_length;

    write_half
        .write_all(format_response(responses::READY, "Incident dashboard ready").as_bytes())
        .await?;
    write_half.flush().await?;

    loop {
        match read_bounded_line(&mut reader, &mut buf, max_length).await {
            Ok(LineRead::Closed) => {
                info!("Connection closed by client {}", client_addr);
                break;
            }
            Ok(LineRead::TooLong) => {
                warn!("Discarded over-long line from {}", client_addr);
                write_half
                    .write_all(
                        format_response(responses::UNKNOWN_COMMAND, "Command too long").as_bytes(),
                    )
                    .await?;
            }
            Ok(LineRead::Line) => {
                let line = String::from_utf8_lossy(&buf);
                let command = parse_command(&line);
                // Only the verb is logged; arguments carry passwords.
                info!(
                    "Received from {}: {}",
                    client_addr,
                    line.split_whitespace().next().unwrap_or("")
                );

                let result = handle_command(&mut client, command, &store, &config.limits).await;

                registry
                    .lock()
                    .await
                    .set_username(&client_addr, client.username().map(str::to_string));

                if let Some(msg) = &result.message {
                    write_half.write_all(msg.as_bytes()).await?;
                }

                if result.status == CommandStatus::CloseConnection {
                    info!("Client {} requested to quit", client_addr);
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read from {}: {}", client_addr, e);
                break;
            }
        }
    }

    Ok(())
}

enum LineRead {
    Line,
    TooLong,
    Closed,
}

/// Reads one line into `buf`, buffering at most `max_length + 1` bytes.
///
/// An over-long line is consumed up to its newline in bounded chunks and
/// reported as [`LineRead::TooLong`].
async fn read_bounded_line<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_length: usize,
) -> std::io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    let limit = max_length as u64 + 1;

    buf.clear();
    if (&mut *reader).take(limit).read_until(b'\n', buf).await? == 0 {
        return Ok(LineRead::Closed);
    }
    if buf.len() <= max_length {
        return Ok(LineRead::Line);
    }

    let mut terminated = buf.ends_with(b"\n");
    while !terminated {
        buf.clear();
        let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
        terminated = n == 0 || buf.ends_with(b"\n");
    }
    buf.clear();
    Ok(LineRead::TooLong)
}
