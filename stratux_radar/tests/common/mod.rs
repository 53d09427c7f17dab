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

// test doubles and record builders shared by the integration tests

use chrono::{DateTime,Utc,Duration};
use stratux_common::geo::GeoPos;
use stratux_radar::{
    alarm::{AlertSink, SoundMode},
    contact::{Contact, ContactKey},
    display::{MarkerPlacement, RingPlacement},
    limits::RadarLimits,
    records::TrafficRecord,
    renderer::{ConnectState, Feed, RadarRenderer},
    situation::{OwnAltitude, Ownship},
};

pub const OWN_LAT: f64 = 47.0;
pub const OWN_LON: f64 = 8.0;
pub const OWN_ALT: f64 = 5000.0;

/// one arc minute of latitude, which is about one nautical mile
pub const ARC_MIN: f64 = 1.0 / 60.0;

#[derive(Debug,Clone,PartialEq)]
pub enum RenderCall {
    Positioned(ContactKey, MarkerPlacement),
    Unpositioned(ContactKey, RingPlacement),
    Hide(ContactKey),
    Release(ContactKey),
    ClearTraces,
    Update(RadarLimits, SoundMode),
    Connection(Feed, ConnectState),
}

#[derive(Debug,Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn clear (&mut self) { self.calls.clear() }

    pub fn released (&self, key: &ContactKey)->bool {
        self.calls.iter().any( |c| *c == RenderCall::Release(*key))
    }

    pub fn n_positioned (&self)->usize {
        self.calls.iter().filter( |c| matches!(c, RenderCall::Positioned(..))).count()
    }

    pub fn n_unpositioned (&self)->usize {
        self.calls.iter().filter( |c| matches!(c, RenderCall::Unpositioned(..))).count()
    }

    pub fn last_ring (&self)->Option<&RingPlacement> {
        self.calls.iter().rev().find_map( |c| if let RenderCall::Unpositioned(_,p) = c { Some(p) } else { None })
    }
}

impl RadarRenderer for RecordingRenderer {
    fn draw_positioned (&mut self, contact: &Contact, placement: &MarkerPlacement) {
        self.calls.push( RenderCall::Positioned( contact.key, placement.clone()))
    }
    fn draw_unpositioned (&mut self, contact: &Contact, placement: &RingPlacement) {
        self.calls.push( RenderCall::Unpositioned( contact.key, placement.clone()))
    }
    fn hide (&mut self, key: &ContactKey) { self.calls.push( RenderCall::Hide(*key)) }
    fn release (&mut self, key: &ContactKey) { self.calls.push( RenderCall::Release(*key)) }
    fn clear_traces (&mut self) { self.calls.push( RenderCall::ClearTraces) }
    fn update (&mut self, own: &Ownship, limits: &RadarLimits, sound: SoundMode) {
        self.calls.push( RenderCall::Update( *limits, sound))
    }
    fn show_connection (&mut self, feed: Feed, state: ConnectState) {
        self.calls.push( RenderCall::Connection( feed, state))
    }
}

#[derive(Debug,Default)]
pub struct RecordingAlerts {
    pub beeps: usize,
    pub spoken: Vec<String>,
}

impl AlertSink for RecordingAlerts {
    fn beep (&mut self) { self.beeps += 1 }
    fn speak (&mut self, text: &str) { self.spoken.push( text.to_string()) }
}

pub fn t0 ()->DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-05-01T12:00:00Z").unwrap().with_timezone(&Utc)
}

pub fn at_millis (ms: i64)->DateTime<Utc> { t0() + Duration::milliseconds(ms) }

pub fn own_ship ()->Ownship {
    Ownship { position: Some( GeoPos::new( OWN_LAT, OWN_LON)), true_course: 0.0, altitude: OwnAltitude::Baro( OWN_ALT) }
}

/// a positioned traffic record `north_nm` north of ownship at time t0 + `ms`
pub fn positioned (addr: u32, alt: i32, north_nm: f64, ms: i64)->TrafficRecord {
    let t = at_millis(ms);
    TrafficRecord {
        icao_addr: addr,
        addr_type: 0,
        tail: format!("N{addr}"),
        signal_level: Some(-20.0),
        position_valid: true,
        lat: OWN_LAT + north_nm * ARC_MIN,
        lng: OWN_LON,
        alt,
        speed: 120.0,
        speed_valid: true,
        track: 180.0,
        timestamp: Some(t),
        last_seen: Some(t),
        last_alt: Some(t),
        ..TrafficRecord::default()
    }
}

/// a traffic record without position at time t0 + `ms`
pub fn unpositioned (addr: u32, alt: i32, signal: f64, ms: i64)->TrafficRecord {
    let t = at_millis(ms);
    TrafficRecord {
        icao_addr: addr,
        addr_type: 0,
        signal_level: Some(signal),
        position_valid: false,
        alt,
        timestamp: Some(t),
        last_seen: Some(t),
        last_alt: Some(t),
        ..TrafficRecord::default()
    }
}
