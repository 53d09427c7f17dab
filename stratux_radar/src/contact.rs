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

use std::fmt;
use chrono::{DateTime,Utc};
use stratux_common::{round_to, finite, angle::Angle360, geo::{GeoPos,LocalOffset}, datetime::utc_time_string};
use crate::records::TrafficRecord;

/// decay rate of the signal strength smoothing
pub const EMA_LAMBDA: f64 = 0.5;

/// max time between two positions (ms) for which we derive a track if the target does not report one
pub const MAX_TRACK_DERIVATION_MILLIS: i64 = 5000;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum AddressKind { Icao, NonIcao }

impl AddressKind {
    pub fn from_addr_type (addr_type: u8)->Self {
        if addr_type == 1 { AddressKind::NonIcao } else { AddressKind::Icao }
    }
}

/// contact identity: the same 24bit address can be used by an ICAO and a non-ICAO (e.g. TIS-B track file) target
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub struct ContactKey {
    pub addr: u32,
    pub kind: AddressKind,
}

impl ContactKey {
    pub fn new (addr: u32, kind: AddressKind)->Self { ContactKey{addr,kind} }

    pub fn from_record (rec: &TrafficRecord)->Self {
        ContactKey { addr: rec.icao_addr, kind: AddressKind::from_addr_type( rec.addr_type) }
    }
}

impl fmt::Display for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AddressKind::Icao => write!(f, "{:06X}", self.addr),
            AddressKind::NonIcao => write!(f, "~{:06X}", self.addr),
        }
    }
}

/// exponential moving average of signal strength with a decay that depends on the elapsed time (ms) since
/// the last sample. An invalid sample leaves the average unchanged, an unknown (or negative) elapsed time
/// restarts it with the new sample
pub fn exp_moving_average (old: Option<f64>, sample: Option<f64>, dt_millis: Option<i64>)->Option<f64> {
    let Some(sample) = finite(sample) else { return old };

    match (old, dt_millis) {
        (Some(old), Some(dt)) if dt >= 0 => {
            let expon = (-(dt as f64) / 100.0 * EMA_LAMBDA).exp();
            Some( old * expon + sample * (1.0 - expon))
        }
        _ => Some(sample)
    }
}

/// the data model for a tracked contact. Display resources are not part of this, they are owned by the renderer
#[derive(Debug,Clone)]
pub struct Contact {
    pub key: ContactKey,
    pub serial: u64, // assigned at creation, stays the same for the lifetime of the contact

    pub tail: String,
    pub target_type: u8,

    pub position: Option<GeoPos>,
    pub altitude: i32,         // ft, rounded to 25
    pub vspeed: i32,           // ft/min, rounded to 100
    pub speed: Option<u16>,    // kn, rounded to 5
    pub track: Option<Angle360>,
    pub track_derived: bool,   // track computed from consecutive positions

    pub signal: Option<f64>,
    pub smoothed_signal: Option<f64>,

    pub timestamp: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_alt: Option<DateTime<Utc>>,
    pub distance_nm: f64,      // as reported by the device

    pub alarms: u32,
    pub n_updates: u64,
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Contact( {}", self.key)?;
        if !self.tail.is_empty() { write!( f, ", tail: \"{}\"", self.tail)?; }
        if let Some(p) = &self.position { write!( f, ", pos: {p}")?; }
        write!( f, ", alt: {}", self.altitude)?;
        if self.vspeed != 0 { write!( f, ", vs: {}", self.vspeed)?; }
        if let Some(spd) = self.speed { write!( f, ", spd: {spd}")?; }
        if let Some(trk) = self.track { write!( f, ", trk: {:.0}{}", trk.degrees(), if self.track_derived {"*"} else {""})?; }
        if let Some(s) = self.smoothed_signal { write!( f, ", sig: {s:.1}")?; }
        if let Some(ts) = &self.timestamp { write!( f, ", time: {}", utc_time_string(ts))?; }
        if self.alarms > 0 { write!( f, ", alarms: {}", self.alarms)?; }
        write!( f, ")")
    }
}

impl Contact {
    pub fn new (key: ContactKey, serial: u64)->Self {
        Contact {
            key, serial,
            tail: String::new(),
            target_type: 0,
            position: None,
            altitude: 0,
            vspeed: 0,
            speed: None,
            track: None,
            track_derived: false,
            signal: None,
            smoothed_signal: None,
            timestamp: None,
            last_seen: None,
            last_alt: None,
            distance_nm: 0.0,
            alarms: 0,
            n_updates: 0
        }
    }

    pub fn is_positioned (&self)->bool { self.position.is_some() }

    /// update all fields from a new record (the contact keeps its identity, serial and alarm counter)
    pub fn update (&mut self, rec: &TrafficRecord) {
        let dt_millis = match (rec.timestamp, self.timestamp) {
            (Some(new_ts), Some(old_ts)) => Some( (new_ts - old_ts).num_milliseconds()),
            _ => None
        };
        self.timestamp = rec.timestamp; // a record without time restarts the average

        self.signal = finite( rec.signal_level);
        self.smoothed_signal = exp_moving_average( self.smoothed_signal, self.signal, dt_millis);

        let last_pos = self.position;
        self.position = if rec.position_valid { Some( GeoPos::new( rec.lat, rec.lng)) } else { None };

        self.altitude = round_to( rec.alt as f64, 25.0) as i32;
        self.vspeed = round_to( rec.vvel, 100.0) as i32;

        if rec.speed_valid {
            self.speed = Some( round_to( rec.speed, 5.0) as u16);
            self.track = Some( Angle360::from_degrees( round_to( rec.track, 5.0)));
            self.track_derived = false;
        } else {
            self.speed = None;
            self.track = match (last_pos, self.position, dt_millis) {
                (Some(p0), Some(p1), Some(dt)) if p0 != p1 && dt > 0 && dt < MAX_TRACK_DERIVATION_MILLIS => {
                    self.track_derived = true;
                    Some( LocalOffset::between( &p0, &p1).bearing())
                }
                _ => if self.track_derived { self.track } else { None } // keep a previously derived track
            };
        }

        if rec.last_seen.is_some() { self.last_seen = rec.last_seen; }
        if rec.last_alt.is_some() { self.last_alt = rec.last_alt; }
        self.distance_nm = rec.distance / 1852.0;

        self.tail = rec.tail.clone();
        self.target_type = rec.target_type;
        self.n_updates += 1;
    }
}
