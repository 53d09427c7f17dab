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

use chrono::{DateTime,Utc};
use tracing::{debug,info,warn};
use crate::{
    RadarConfig,
    alarm::{AlarmPolicy, AlertSink, SoundMode},
    errors::Result,
    limits::RadarLimits,
    records::{RadarMessage, SettingsRecord, SituationRecord, StatusRecord, TrafficRecord},
    renderer::{ConnectState, Feed, RadarRenderer},
    situation::Ownship,
    tracker::{ContactTracker, StaleCutoffs, TrackContext, TrackEvent},
};

/// the complete state of a radar display. All mutation happens through `&mut self` from a single task, which
/// keeps message handling in arrival order
#[derive(Debug)]
pub struct RadarSession {
    own: Ownship,
    limits: RadarLimits,
    policy: AlarmPolicy,
    sound: SoundMode,
    unpositioned_alt_factor: f64,
    cutoffs: StaleCutoffs,

    clock: Option<DateTime<Utc>>, // device clock from last status poll
    traffic_state: ConnectState,
    situation_state: ConnectState,

    tracker: ContactTracker,
}

impl RadarSession {
    pub fn new (config: &RadarConfig)->Self {
        RadarSession {
            own: Ownship::default(),
            limits: config.limits,
            policy: config.alarm.clone(),
            sound: config.sound_mode,
            unpositioned_alt_factor: config.unpositioned_alt_factor,
            cutoffs: StaleCutoffs { last_seen: config.max_last_seen_age, last_alt: config.max_last_alt_age },
            clock: None,
            traffic_state: ConnectState::Disconnected,
            situation_state: ConnectState::Disconnected,
            tracker: ContactTracker::new(),
        }
    }

    pub fn own (&self)->&Ownship { &self.own }
    pub fn limits (&self)->&RadarLimits { &self.limits }
    pub fn sound_mode (&self)->SoundMode { self.sound }
    pub fn tracker (&self)->&ContactTracker { &self.tracker }

    pub fn connect_state (&self, feed: Feed)->ConnectState {
        match feed { Feed::Traffic => self.traffic_state, Feed::Situation => self.situation_state }
    }

    /// a text message from the traffic socket, which carries both traffic and settings records.
    /// Returns the track event if this was a traffic record
    pub fn handle_traffic_msg (&mut self, msg: &str, renderer: &mut dyn RadarRenderer, alerts: &mut dyn AlertSink)->Result<Option<TrackEvent>> {
        match RadarMessage::decode( msg)? {
            RadarMessage::Settings(settings) => {
                self.apply_settings( &settings, renderer);
                Ok(None)
            }
            RadarMessage::Traffic(rec) => Ok( Some( self.handle_traffic( &rec, renderer, alerts)))
        }
    }

    pub fn handle_traffic (&mut self, rec: &TrafficRecord, renderer: &mut dyn RadarRenderer, alerts: &mut dyn AlertSink)->TrackEvent {
        // field-wise borrows, the tracker is borrowed mutably
        let ctx = TrackContext {
            own: &self.own,
            limits: &self.limits,
            policy: &self.policy,
            sound: self.sound,
            unpositioned_alt_factor: self.unpositioned_alt_factor
        };
        let event = self.tracker.handle_traffic( rec, &ctx, renderer, alerts);
        match event {
            TrackEvent::Created{..} | TrackEvent::Moved{..} => info!("{event}"),
            _ => debug!("{event}")
        }
        event
    }

    pub fn handle_situation_msg (&mut self, msg: &str, renderer: &mut dyn RadarRenderer)->Result<()> {
        let rec = SituationRecord::decode( msg)?;
        self.handle_situation( &rec, renderer);
        Ok(())
    }

    pub fn handle_situation (&mut self, rec: &SituationRecord, renderer: &mut dyn RadarRenderer) {
        let own = Ownship::from_record( rec);
        if own.has_valid_altitude() != self.own.has_valid_altitude() {
            info!("own altitude now {}", own.altitude);
        }
        self.own = own;
        renderer.update( &self.own, &self.limits, self.sound);
    }

    pub fn handle_status (&mut self, status: &StatusRecord, renderer: &mut dyn RadarRenderer) {
        if status.uptime_clock.is_some() {
            self.clock = status.uptime_clock;
        }
        renderer.update( &self.own, &self.limits, self.sound);
    }

    /// the time against which contact ages are computed: the device clock if we have one, otherwise the
    /// most recent time we have seen any contact
    pub fn reference_time (&self)->Option<DateTime<Utc>> {
        self.clock.or_else( || self.tracker.newest_last_seen())
    }

    /// run the stale contact eviction. Returns number of removed contacts
    pub fn evict_stale (&mut self, renderer: &mut dyn RadarRenderer)->usize {
        let Some(now) = self.reference_time() else { return 0 };
        let n = self.tracker.remove_stale( &now, &self.cutoffs, renderer);
        if n > 0 {
            info!("evicted {n} stale contacts, {} remaining", self.tracker.len());
        }
        renderer.update( &self.own, &self.limits, self.sound);
        n
    }

    /// set new display limits. Returns true if they changed, in which case the screen scale is different and
    /// all traces are cleared
    pub fn apply_limits (&mut self, limits: RadarLimits, renderer: &mut dyn RadarRenderer)->bool {
        if limits != self.limits {
            info!("radar limits changed to {limits}");
            self.limits = limits;
            self.tracker.clear_traces( renderer);
            renderer.update( &self.own, &self.limits, self.sound);
            true
        } else {
            false
        }
    }

    pub fn apply_settings (&mut self, settings: &SettingsRecord, renderer: &mut dyn RadarRenderer)->bool {
        let limits = self.limits.with_settings( settings);
        self.apply_limits( limits, renderer)
    }

    pub fn set_connect_state (&mut self, feed: Feed, state: ConnectState, renderer: &mut dyn RadarRenderer) {
        let current = match feed { Feed::Traffic => &mut self.traffic_state, Feed::Situation => &mut self.situation_state };
        if *current != state {
            *current = state;
            renderer.show_connection( feed, state);
        }
    }

    pub fn cycle_sound_mode (&mut self, renderer: &mut dyn RadarRenderer, alerts: &mut dyn AlertSink)->SoundMode {
        self.set_sound_mode( self.sound.next(), renderer, alerts);
        self.sound
    }

    pub fn set_sound_mode (&mut self, sound: SoundMode, renderer: &mut dyn RadarRenderer, alerts: &mut dyn AlertSink) {
        self.sound = sound;
        alerts.speak( sound.status_text());
        renderer.update( &self.own, &self.limits, self.sound);
    }
}
