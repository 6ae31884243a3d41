//! WebSocket client session management.
//!
//! A session has two phases: a login frame is sent right after the
//! handshake, then incoming events are printed while input lines are sent
//! as chat messages.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use hubbub_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use hubbub_shared::time::Clock;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    error::ClientError,
    formatter::MessageFormatter,
    input::spawn_line_reader,
    ui::{prompt, redisplay_prompt},
};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Run one session: connect, log in as `name`, then relay stdin lines
/// until the user quits or the server goes away.
pub async fn run_client_session(url: &str, name: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to relay at {}", url);

    let (mut write, read) = ws_stream.split();
    send_event(
        &mut write,
        ClientEvent::Login {
            name: name.to_string(),
        },
    )
    .await?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        name
    );

    let mut read_task = tokio::spawn(print_incoming(read, name.to_string()));
    let mut write_task = tokio::spawn(send_lines(write, spawn_line_reader(prompt(name))));

    // Whichever side finishes first ends the session
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or(Err(ClientError::ConnectionLost))
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(Err(ClientError::ConnectionLost))
        }
    }
}

async fn send_event(write: &mut WsSink, event: ClientEvent) -> Result<(), ClientError> {
    let frame = event.encode()?;
    write
        .send(Message::Text(frame.into()))
        .await
        .map_err(|_| ClientError::ConnectionLost)
}

/// Print incoming frames until the server closes the connection.
///
/// The server never closes a healthy session, so any end of the stream is
/// reported as a lost connection.
async fn print_incoming(mut read: WsSource, name: String) -> Result<(), ClientError> {
    let formatter = MessageFormatter::system();

    while let Some(message) = read.next().await {
        match message {
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                break;
            }
            Ok(frame) => {
                if let Some(line) = render_frame(&formatter, &frame) {
                    print!("{}", line);
                    redisplay_prompt(&name);
                }
            }
            Err(e) => {
                tracing::warn!("WebSocket read error: {}", e);
                break;
            }
        }
    }

    Err(ClientError::ConnectionLost)
}

/// Send each input line as a chat message, then close the connection
/// politely so the relay announces our departure.
async fn send_lines(
    mut write: WsSink,
    mut lines: mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    while let Some(text) = lines.recv().await {
        send_event(&mut write, ClientEvent::Message { text }).await?;
    }

    write.send(Message::Close(None)).await.ok();
    Ok(())
}

/// Text to print for a data frame. Control frames print nothing.
fn render_frame<C: Clock>(formatter: &MessageFormatter<C>, frame: &Message) -> Option<String> {
    match frame {
        Message::Text(text) => Some(match ServerEvent::decode(text.as_str()) {
            Ok(event) => formatter.format_event(&event),
            Err(_) => formatter.format_raw_frame(text.as_str()),
        }),
        Message::Binary(data) => Some(formatter.format_binary_frame(data.len())),
        _ => None,
    }
}
