/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::time::Duration;
use futures_util::stream::StreamExt;
use tokio::{net::TcpStream, time::sleep};
use tokio_tungstenite::{connect_async, WebSocketStream, MaybeTlsStream, tungstenite::protocol::Message};
use kanal::AsyncSender;
use tracing::{debug,info,warn};

use crate::net::NetError;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// what a [`ws_loop`] reports to its consumer, in arrival order
#[derive(Debug,Clone,PartialEq)]
pub enum WsEvent {
    Connected,
    Message(String),
    Problem(String),  // socket error, always followed by `Disconnected`
    Disconnected,     // socket closed or could not be opened, reconnect is scheduled
}

/// read-only websocket client loop that reconnects with a fixed delay and no retry cap.
/// The loop terminates when the consumer drops the receiving end of `events` (this is nominal
/// termination, not an error), or when the task running it gets aborted.
pub async fn ws_loop (ws_uri: String, reconnect_delay: Duration, events: AsyncSender<WsEvent>) {
    loop {
        match connect( ws_uri.as_str()).await {
            Ok(mut ws_stream) => {
                info!("connected to {ws_uri}");
                if events.send( WsEvent::Connected).await.is_err() { return }

                loop {
                    match ws_stream.next().await {
                        Some(Ok(msg)) => match msg {
                            Message::Text(txt) => {
                                if events.send( WsEvent::Message( txt.as_str().to_string())).await.is_err() { return }
                            }
                            Message::Close(_) => {
                                debug!("server closed websocket {ws_uri}");
                                break
                            }
                            _ => {} // ping/pong is handled by tungstenite, binary is not part of the feed
                        }
                        Some(Err(e)) => {
                            warn!("reconnecting after failed websocket read: {e}");
                            if events.send( WsEvent::Problem( e.to_string())).await.is_err() { return }
                            break
                        }
                        None => break
                    }
                }
            }
            Err(e) => {
                debug!("{e}");
                if events.send( WsEvent::Problem( e.to_string())).await.is_err() { return }
            }
        }

        if events.send( WsEvent::Disconnected).await.is_err() { return }
        sleep( reconnect_delay).await;
    }
}

pub async fn connect (ws_uri: &str)->Result<WsStream,NetError> {
    match connect_async( ws_uri).await {
        Ok((ws_stream,_response)) => Ok( ws_stream),
        Err(e) => Err( NetError::OpFailed( format!("websocket connect to {ws_uri} failed: {e}")))
    }
}
