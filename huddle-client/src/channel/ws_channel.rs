use crate::channel::EventChannel;
use crate::error::ClientError;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientEvent, ProtocolError, ServerEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// Event channel over a WebSocket to the relay's `/ws` endpoint.
pub struct WsEventChannel {
    outbound: mpsc::UnboundedSender<Message>,
}

impl WsEventChannel {
    /// Connect and start the reader/writer tasks. Server events that decode
    /// are forwarded to the returned receiver; the receiver ends when the
    /// socket does.
    pub async fn connect(
        url: &str,
        buffer: usize,
    ) -> Result<(Self, mpsc::Receiver<ServerEvent>), ClientError> {
        let (ws, _) = connect_async(url)
            .await
            .map_err(|e| ClientError::Channel(format!("failed to connect to {}: {}", url, e)))?;
        info!("Event channel connected to {}", url);

        let (mut sink, mut stream) = ws.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let (events_tx, events_rx) = mpsc::channel(buffer);

        tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                if let Err(e) = sink.send(msg).await {
                    error!("Failed to write to event channel: {}", e);
                    break;
                }
            }
            let _ = sink.close().await;
        });

        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                let text = match frame {
                    Ok(Message::Text(text)) => text,
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Event channel read error: {}", e);
                        break;
                    }
                };

                match ServerEvent::decode(text.as_str()) {
                    Ok(event) => {
                        debug!("relay -> {}", event.name());
                        if events_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(ProtocolError::UnknownEvent(name)) => {
                        warn!("Ignoring unknown event '{}' from relay", name);
                    }
                    Err(e) => warn!("Ignoring malformed frame from relay: {}", e),
                }
            }
            info!("Event channel closed");
        });

        Ok((Self { outbound }, events_rx))
    }
}

#[async_trait]
impl EventChannel for WsEventChannel {
    async fn emit(&self, event: ClientEvent) -> Result<(), ClientError> {
        let json = event.encode()?;
        debug!("{} -> relay", event.name());

        self.outbound
            .send(Message::Text(json.into()))
            .map_err(|_| ClientError::Channel("event channel closed".to_owned()))
    }
}
