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

use std::{fmt, time::Duration};
use chrono::{DateTime,Utc};
use tracing::{debug,info};
use stratux_common::datetime::{age_at, secs};
use crate::{
    alarm::{AlarmPolicy, AlertSink, Announcement, SoundMode, clock_position},
    contact::{Contact, ContactKey},
    display::{self, AltLabel, RADAR_RADIUS_PX},
    limits::RadarLimits,
    records::TrafficRecord,
    renderer::RadarRenderer,
    situation::Ownship,
};

/// the session state a traffic update is evaluated against
#[derive(Debug,Clone,Copy)]
pub struct TrackContext<'a> {
    pub own: &'a Ownship,
    pub limits: &'a RadarLimits,
    pub policy: &'a AlarmPolicy,
    pub sound: SoundMode,
    pub unpositioned_alt_factor: f64, // widens the altitude band for storing new contacts without position
}

impl<'a> TrackContext<'a> {
    /// the altitude band (hundreds of ft) within which new contacts are stored
    pub fn alt_budget (&self, positioned: bool)->f64 {
        let threshold = self.limits.alt_diff_threshold as f64;
        if positioned { threshold } else { threshold * self.unpositioned_alt_factor }
    }
}

/// max contact age (since the respective device timestamp) before contacts are evicted
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct StaleCutoffs {
    pub last_seen: Duration,
    pub last_alt: Duration, // only used for contacts without position
}

impl Default for StaleCutoffs {
    fn default()->Self { StaleCutoffs { last_seen: secs(59), last_alt: secs(59) } }
}

/// what a traffic record did to the tracked contacts
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum TrackEvent {
    Created { key: ContactKey, positioned: bool },
    Updated { key: ContactKey, positioned: bool },
    Moved { key: ContactKey, positioned: bool }, // `positioned` is the new list
    Ignored { key: ContactKey },
}

impl fmt::Display for TrackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |positioned: &bool| if *positioned { "positioned" } else { "unpositioned" };
        match self {
            TrackEvent::Created{key,positioned} => write!(f, "created {} {key}", list(positioned)),
            TrackEvent::Updated{key,positioned} => write!(f, "updated {} {key}", list(positioned)),
            TrackEvent::Moved{key,positioned} => write!(f, "moved {key} to {}", list(positioned)),
            TrackEvent::Ignored{key} => write!(f, "ignored {key}"),
        }
    }
}

/// the two contact lists. Each contact is in exactly one of them, newest contacts first.
/// Lists are small (a few dozen entries at most) so we use linear scans
#[derive(Debug,Default)]
pub struct ContactTracker {
    positioned: Vec<Contact>,
    unpositioned: Vec<Contact>,
    next_serial: u64,
}

impl ContactTracker {
    pub fn new ()->Self { ContactTracker::default() }

    pub fn positioned (&self)->&[Contact] { self.positioned.as_slice() }
    pub fn unpositioned (&self)->&[Contact] { self.unpositioned.as_slice() }

    pub fn len (&self)->usize { self.positioned.len() + self.unpositioned.len() }
    pub fn is_empty (&self)->bool { self.len() == 0 }

    pub fn get (&self, key: &ContactKey)->Option<&Contact> {
        self.positioned.iter().chain( self.unpositioned.iter()).find( |c| c.key == *key)
    }

    pub fn iter (&self)->impl Iterator<Item=&Contact> {
        self.positioned.iter().chain( self.unpositioned.iter())
    }

    /// the most recent `last_seen` of all contacts, which is our best guess for the device clock if we don't get
    /// status updates
    pub fn newest_last_seen (&self)->Option<DateTime<Utc>> {
        self.iter().filter_map( |c| c.last_seen).max()
    }

    /// process a traffic record: update a known contact in place (moving it to the other list if its position
    /// validity changed) or store a new one if it is within our altitude budget
    pub fn handle_traffic (&mut self, rec: &TrafficRecord, ctx: &TrackContext,
                           renderer: &mut dyn RadarRenderer, alerts: &mut dyn AlertSink)->TrackEvent
    {
        let key = ContactKey::from_record( rec);

        if let Some(idx) = self.positioned.iter().position( |c| c.key == key) {
            self.positioned[idx].update( rec);
            if self.positioned[idx].is_positioned() {
                check_positioned( &mut self.positioned[idx], ctx, renderer, alerts);
                TrackEvent::Updated { key, positioned: true }
            } else {
                let contact = self.positioned.remove( idx);
                renderer.release( &key);
                self.unpositioned.insert( 0, contact);
                check_unpositioned( &mut self.unpositioned[0], ctx, renderer, alerts);
                TrackEvent::Moved { key, positioned: false }
            }

        } else if let Some(idx) = self.unpositioned.iter().position( |c| c.key == key) {
            self.unpositioned[idx].update( rec);
            if !self.unpositioned[idx].is_positioned() {
                check_unpositioned( &mut self.unpositioned[idx], ctx, renderer, alerts);
                TrackEvent::Updated { key, positioned: false }
            } else {
                let contact = self.unpositioned.remove( idx);
                renderer.release( &key);
                self.positioned.insert( 0, contact);
                check_positioned( &mut self.positioned[0], ctx, renderer, alerts);
                TrackEvent::Moved { key, positioned: true }
            }

        } else {
            let positioned = rec.position_valid;
            let in_budget = if rec.alt > 0 {
                ctx.own.altitude_diff( rec.alt as f64)
                    .map( |d| (d.abs() as f64) <= ctx.alt_budget( positioned))
                    .unwrap_or(false)
            } else {
                false
            };

            if in_budget {
                let mut contact = Contact::new( key, self.next_serial);
                self.next_serial += 1;
                contact.update( rec);

                if positioned {
                    self.positioned.insert( 0, contact);
                    check_positioned( &mut self.positioned[0], ctx, renderer, alerts);
                } else {
                    self.unpositioned.insert( 0, contact);
                    check_unpositioned( &mut self.unpositioned[0], ctx, renderer, alerts);
                }
                TrackEvent::Created { key, positioned }
            } else {
                TrackEvent::Ignored { key }
            }
        }
    }

    /// remove contacts that have not been updated within the respective cutoff before `now`. Positioned contacts
    /// age by their `last_seen` time, contacts without position by `last_seen` and `last_alt`. Both are device uptime
    /// clock values, the record timestamp is wall clock time and can't be compared against `now`. Contacts without
    /// the respective uptime timestamp are removed. Returns the number of removed contacts
    pub fn remove_stale (&mut self, now: &DateTime<Utc>, cutoffs: &StaleCutoffs, renderer: &mut dyn RadarRenderer)->usize {
        let is_older = |dt: Option<DateTime<Utc>>, max_age: Duration| {
            match dt {
                Some(dt) => age_at( now, &dt) >= max_age,
                None => true
            }
        };
        let n_before = self.len();

        self.positioned.retain( |c| {
            let stale = is_older( c.last_seen, cutoffs.last_seen);
            if stale {
                debug!("evict {}", c.key);
                renderer.release( &c.key);
            }
            !stale
        });

        self.unpositioned.retain( |c| {
            let stale = is_older( c.last_seen, cutoffs.last_seen)
                || is_older( c.last_alt, cutoffs.last_alt);
            if stale {
                debug!("evict {}", c.key);
                renderer.release( &c.key);
            }
            !stale
        });

        n_before - self.len()
    }

    /// remove all symbols and traces from the display and re-arm all alarms. Used when the screen scale changes
    pub fn clear_traces (&mut self, renderer: &mut dyn RadarRenderer) {
        for c in self.positioned.iter_mut().chain( self.unpositioned.iter_mut()) {
            c.alarms = 0;
            renderer.hide( &c.key);
        }
        renderer.clear_traces();
    }

    /// drop all contacts
    pub fn clear (&mut self, renderer: &mut dyn RadarRenderer) {
        for c in self.iter() { renderer.release( &c.key) }
        self.positioned.clear();
        self.unpositioned.clear();
    }
}

/// altitude difference to use for filtering. If our own altitude is unknown we fall back to the absolute altitude
fn filter_alt_diff (contact: &Contact, own: &Ownship)->i32 {
    own.altitude_diff( contact.altitude as f64).unwrap_or_else( || (contact.altitude as f64 / 100.0).round() as i32)
}

fn check_positioned (contact: &mut Contact, ctx: &TrackContext, renderer: &mut dyn RadarRenderer, alerts: &mut dyn AlertSink) {
    let key = contact.key;

    if filter_alt_diff( contact, ctx.own).unsigned_abs() > ctx.limits.alt_diff_threshold {
        renderer.hide( &key);
        return
    }

    let Some(offset) = display::contact_offset( contact, ctx.own) else {
        renderer.hide( &key); // we don't know where we are
        return
    };

    let radius = ctx.limits.radius_nm();
    let distance = offset.distance_nm();
    let announcement = ctx.own.altitude_diff( contact.altitude as f64).map( |alt_diff| {
        Announcement { alt_diff, clock: Some( clock_position( offset.bearing(), ctx.own.true_course)) }
    });
    ctx.policy.evaluate( &mut contact.alarms, distance, radius, ctx.sound, announcement.as_ref(), alerts);

    if distance <= radius {
        let label = display::alt_label( contact, ctx.own);
        renderer.draw_positioned( contact, &display::marker_placement( contact, &offset, label, ctx.limits));
    } else {
        renderer.release( &key) // out of range drops the trace
    }
}

fn check_unpositioned (contact: &mut Contact, ctx: &TrackContext, renderer: &mut dyn RadarRenderer, alerts: &mut dyn AlertSink) {
    let key = contact.key;

    if contact.altitude == 0 { // unspecified altitude, nothing to show
        renderer.hide( &key);
        return
    }

    let alt_diff = ctx.own.altitude_diff( contact.altitude as f64);
    if let Some(d) = alt_diff {
        if d.unsigned_abs() > ctx.limits.alt_diff_threshold {
            renderer.hide( &key);
            return
        }
    }

    let Some(ema) = contact.smoothed_signal else {
        renderer.hide( &key); // no signal, no distance estimate
        return
    };

    let distance = display::estimated_distance_nm( ema);
    let announcement = alt_diff.map( |alt_diff| Announcement { alt_diff, clock: None });
    ctx.policy.evaluate( &mut contact.alarms, distance, ctx.limits.radius_nm(), ctx.sound, announcement.as_ref(), alerts);

    let label = display::alt_label( contact, ctx.own);
    let placement = display::ring_placement( distance, label, ctx.limits);
    if placement.radius_px <= RADAR_RADIUS_PX {
        renderer.draw_unpositioned( contact, &placement);
    } else {
        renderer.hide( &key);
    }
}
