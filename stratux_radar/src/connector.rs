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
use reqwest::Client;
use tokio::{self, select, task::JoinHandle, time::{interval, interval_at, Instant, MissedTickBehavior}};
use kanal::{AsyncReceiver, AsyncSender, bounded_async};
use tracing::{debug,info,warn,error};
use stratux_common::{net::{get_json, NetError}, ws::{ws_loop, WsEvent}};
use crate::{
    RadarConfig,
    alarm::{AlertSink, SoundMode},
    errors::Result,
    limits::{RadarLimits, post_limits},
    records::StatusRecord,
    renderer::{ConnectState, Feed, RadarRenderer},
    session::RadarSession,
};

type StatusResult = std::result::Result<StatusRecord,NetError>;

/// user commands for a running connector
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum RadarCmd {
    SetLimits(RadarLimits),
    ZoomIn,
    ZoomOut,
    AltMore,
    AltLess,
    SetSoundMode(SoundMode),
    CycleSoundMode,
    Terminate,
}

/// connects a [`RadarSession`] to the device: traffic and situation websockets, status polling and stale
/// contact eviction, all multiplexed in one task so that session state is only mutated in arrival order
pub struct RadarConnector<R,A> where R: RadarRenderer, A: AlertSink {
    config: RadarConfig,
    session: RadarSession,
    renderer: R,
    alerts: A,
    client: Client,
}

impl<R,A> RadarConnector<R,A> where R: RadarRenderer, A: AlertSink {
    pub fn new (config: RadarConfig, renderer: R, alerts: A)->Result<Self> {
        let client = Client::builder().timeout( config.http_timeout).build()?;
        let session = RadarSession::new( &config);
        Ok( RadarConnector { config, session, renderer, alerts, client } )
    }

    pub fn session (&self)->&RadarSession { &self.session }
    pub fn renderer (&self)->&R { &self.renderer }

    /// run until we get a `Terminate` command or the command channel is closed. Socket tasks are cancelled on exit.
    /// HTTP requests run in their own tasks, the loop only processes their results
    pub async fn run (&mut self, cmds: AsyncReceiver<RadarCmd>)->Result<()> {
        let (traffic_tx, traffic_rx) = bounded_async::<WsEvent>( 256);
        let (situation_tx, situation_rx) = bounded_async::<WsEvent>( 16);

        let traffic_task = tokio::spawn( ws_loop( self.config.traffic_url.clone(), self.config.reconnect_delay, traffic_tx));
        let situation_task = tokio::spawn( ws_loop( self.config.situation_url.clone(), self.config.reconnect_delay, situation_tx));

        let mut status_timer = interval( self.config.status_interval);
        status_timer.set_missed_tick_behavior( MissedTickBehavior::Skip);
        let mut evict_timer = interval_at( Instant::now() + self.config.evict_interval, self.config.evict_interval);

        let (status_tx, status_rx) = bounded_async::<StatusResult>( 1);
        let mut status_task: Option<JoinHandle<()>> = None; // at most one outstanding poll

        self.renderer.update( self.session.own(), self.session.limits(), self.session.sound_mode());

        loop {
            select! {
                ev = traffic_rx.recv() => match ev {
                    Ok(ev) => self.handle_ws_event( Feed::Traffic, ev),
                    Err(_) => { error!("traffic feed terminated"); break }
                },
                ev = situation_rx.recv() => match ev {
                    Ok(ev) => self.handle_ws_event( Feed::Situation, ev),
                    Err(_) => { error!("situation feed terminated"); break }
                },
                _ = status_timer.tick() => if status_task.is_none() {
                    status_task = Some( self.spawn_status_poll( status_tx.clone()));
                },
                res = status_rx.recv() => if let Ok(res) = res {
                    status_task = None;
                    self.handle_status_result( res);
                },
                _ = evict_timer.tick() => { self.session.evict_stale( &mut self.renderer); }
                cmd = cmds.recv() => match cmd {
                    Ok(RadarCmd::Terminate) | Err(_) => break,
                    Ok(cmd) => self.handle_cmd( cmd)
                }
            }
        }

        info!("terminating radar connector");
        traffic_task.abort();
        situation_task.abort();
        if let Some(task) = status_task { task.abort() }
        Ok(())
    }

    fn handle_ws_event (&mut self, feed: Feed, ev: WsEvent) {
        match ev {
            WsEvent::Connected => self.session.set_connect_state( feed, ConnectState::Connected, &mut self.renderer),
            WsEvent::Problem(msg) => {
                debug!("{feed} feed problem: {msg}");
                self.session.set_connect_state( feed, ConnectState::Problem, &mut self.renderer)
            }
            WsEvent::Disconnected => self.session.set_connect_state( feed, ConnectState::Disconnected, &mut self.renderer),
            WsEvent::Message(msg) => {
                let res = match feed {
                    Feed::Traffic => self.session.handle_traffic_msg( &msg, &mut self.renderer, &mut self.alerts).map(|_| ()),
                    Feed::Situation => self.session.handle_situation_msg( &msg, &mut self.renderer),
                };
                if let Err(e) = res {
                    warn!("dropping malformed {feed} message: {e}");
                }
            }
        }
    }

    fn spawn_status_poll (&self, tx: AsyncSender<StatusResult>)->JoinHandle<()> {
        let client = self.client.clone();
        let url = self.config.status_url.clone();
        tokio::spawn( async move {
            let res = get_json::<StatusRecord,_>( &client, url.as_str()).await;
            let _ = tx.send( res).await; // receiver is gone if we are terminating
        })
    }

    fn handle_status_result (&mut self, res: StatusResult) {
        match res {
            Ok(status) => self.session.handle_status( &status, &mut self.renderer),
            Err(e) => {
                debug!("status poll failed: {e}");
                self.renderer.update( self.session.own(), self.session.limits(), self.session.sound_mode());
            }
        }
    }

    fn handle_cmd (&mut self, cmd: RadarCmd) {
        let limits = *self.session.limits();
        let new_limits = match cmd {
            RadarCmd::SetLimits(new_limits) => new_limits,
            RadarCmd::ZoomIn => limits.zoom_in(),
            RadarCmd::ZoomOut => limits.zoom_out(),
            RadarCmd::AltMore => limits.alt_more(),
            RadarCmd::AltLess => limits.alt_less(),
            RadarCmd::SetSoundMode(sound) => {
                self.session.set_sound_mode( sound, &mut self.renderer, &mut self.alerts);
                return
            }
            RadarCmd::CycleSoundMode => {
                self.session.cycle_sound_mode( &mut self.renderer, &mut self.alerts);
                return
            }
            RadarCmd::Terminate => return
        };

        if self.session.apply_limits( new_limits, &mut self.renderer) {
            let client = self.client.clone();
            let url = self.config.settings_url.clone();
            tokio::spawn( async move {
                if let Err(e) = post_limits( &client, url.as_str(), &new_limits).await {
                    warn!("failed to store radar limits on device: {e}");
                }
            });
        }
    }
}
