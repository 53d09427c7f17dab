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

//! the seams between contact tracking and the outside world. The tracker only decides *what* is shown where,
//! a [`RadarRenderer`] owns all display resources (keyed by [`ContactKey`]) and an [`AlertSink`] plays alarms

use std::{collections::HashMap, f64::consts::PI, fmt};
use tracing::{debug,info,warn};
use crate::{
    alarm::{AlertSink, SoundMode},
    contact::{Contact, ContactKey},
    display::{MarkerPlacement, RingPlacement},
    limits::RadarLimits,
    situation::Ownship,
};

/// the device feeds we keep connections to
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Feed { Traffic, Situation }

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Feed::Traffic => write!(f, "traffic"), Feed::Situation => write!(f, "situation") }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum ConnectState {
    #[default]
    Disconnected,
    Connected,
    Problem,
}

impl fmt::Display for ConnectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectState::Disconnected => write!(f, "Disconnected"),
            ConnectState::Connected => write!(f, "Connected"),
            ConnectState::Problem => write!(f, "Problem connecting"),
        }
    }
}

/// display backend for the radar screen. Calls for a single contact key are always made from the same task
pub trait RadarRenderer {
    /// (re)draw a contact with known position. Consecutive draws of the same contact extend its trace
    fn draw_positioned (&mut self, contact: &Contact, placement: &MarkerPlacement);

    /// (re)draw the distance ring of a contact without position
    fn draw_unpositioned (&mut self, contact: &Contact, placement: &RingPlacement);

    /// remove the symbol of a contact but keep its trace
    fn hide (&mut self, key: &ContactKey);

    /// drop all display resources of a contact (symbol, trace, label slot)
    fn release (&mut self, key: &ContactKey);

    /// drop the traces of all contacts (screen scale changed)
    fn clear_traces (&mut self);

    /// ownship, limits or sound mode changed
    fn update (&mut self, own: &Ownship, limits: &RadarLimits, sound: SoundMode);

    fn show_connection (&mut self, feed: Feed, state: ConnectState);
}

/* #region LogRenderer *****************************************************************************************/

/// angular start position of ring labels (left, labels only go into the upper half)
const LABEL_ANGLE_START: f64 = PI;
const LABEL_ANGLE_STEP: f64 = 3.0 * PI / 16.0;

#[derive(Debug,Default)]
struct Symbol {
    visible: bool,
    label_angle: Option<f64>,
    trace: Vec<(f64,f64)>,
}

/// a renderer that keeps the display state of contacts and logs every change. Used by the monitor binary and
/// as a reference for real display backends
#[derive(Debug)]
pub struct LogRenderer {
    symbols: HashMap<ContactKey,Symbol>,
    next_label_angle: f64,
    max_trace_len: usize,
}

impl Default for LogRenderer {
    fn default()->Self { LogRenderer::new( 100) }
}

impl LogRenderer {
    pub fn new (max_trace_len: usize)->Self {
        LogRenderer { symbols: HashMap::new(), next_label_angle: LABEL_ANGLE_START, max_trace_len }
    }

    pub fn n_visible (&self)->usize { self.symbols.values().filter(|s| s.visible).count() }

    pub fn is_visible (&self, key: &ContactKey)->bool {
        self.symbols.get(key).map( |s| s.visible).unwrap_or(false)
    }

    pub fn trace_len (&self, key: &ContactKey)->usize {
        self.symbols.get(key).map( |s| s.trace.len()).unwrap_or(0)
    }

    pub fn label_angle (&self, key: &ContactKey)->Option<f64> {
        self.symbols.get(key).and_then( |s| s.label_angle)
    }

    /// ring labels are spread over the upper half circle so that they don't overlap
    fn assign_label_angle (&mut self)->f64 {
        let angle = self.next_label_angle;
        self.next_label_angle += LABEL_ANGLE_STEP;
        if self.next_label_angle > 2.0 * PI { self.next_label_angle = LABEL_ANGLE_START }
        angle
    }
}

impl RadarRenderer for LogRenderer {
    fn draw_positioned (&mut self, contact: &Contact, placement: &MarkerPlacement) {
        let max_trace_len = self.max_trace_len;
        let sym = self.symbols.entry( contact.key).or_default();
        sym.visible = true;
        sym.label_angle = None;
        if sym.trace.last() != Some( &(placement.dx, placement.dy)) {
            if sym.trace.len() >= max_trace_len { sym.trace.remove(0); }
            sym.trace.push( (placement.dx, placement.dy));
        }

        let speed = contact.speed.map( |s| format!("{s}kts")).unwrap_or_else( || "---".to_string());
        debug!("{} {:>8} at ({:4},{:4}) {:5.1}nm/{:03.0}° hdg {:03.0} {}",
               contact.key, contact.tail, placement.dx, placement.dy, placement.distance_nm, placement.bearing.degrees(),
               placement.heading, placement.label);
    }

    fn draw_unpositioned (&mut self, contact: &Contact, placement: &RingPlacement) {
        let angle = match self.label_angle( &contact.key) {
            Some(angle) => angle,
            None => self.assign_label_angle()
        };
        let sym = self.symbols.entry( contact.key).or_default();
        sym.visible = true;
        sym.label_angle = Some(angle);

        let dx = (placement.radius_px * angle.cos()).round();
        let dy = (placement.radius_px * angle.sin()).round();
        debug!("{} {:>8} ring {:3}px ~{:4.1}nm label at ({},{}) {}",
               contact.key, contact.tail, placement.radius_px, placement.distance_nm, dx, dy, placement.label);
    }

    fn hide (&mut self, key: &ContactKey) {
        if let Some(sym) = self.symbols.get_mut( key) {
            if sym.visible {
                sym.visible = false;
                debug!("{key} hidden");
            }
        }
    }

    fn release (&mut self, key: &ContactKey) {
        if self.symbols.remove( key).is_some() {
            debug!("{key} released");
        }
    }

    fn clear_traces (&mut self) {
        for sym in self.symbols.values_mut() { sym.trace.clear() }
    }

    fn update (&mut self, own: &Ownship, limits: &RadarLimits, sound: SoundMode) {
        let crs = own.true_course;
        info!("ownship {} crs {crs:03.0}, {limits}, {:?}: {} contacts visible", own.altitude, sound, self.n_visible());
    }

    fn show_connection (&mut self, feed: Feed, state: ConnectState) {
        match state {
            ConnectState::Problem => warn!("{feed} feed: {state}"),
            _ => info!("{feed} feed: {state}")
        }
    }
}

/* #endregion LogRenderer */

/// an alert sink that just logs
#[derive(Debug,Default)]
pub struct LogAlerts {
    pub n_beeps: usize,
    pub n_spoken: usize,
}

impl AlertSink for LogAlerts {
    fn beep (&mut self) {
        self.n_beeps += 1;
        warn!("\u{0007}TRAFFIC");
    }

    fn speak (&mut self, text: &str) {
        self.n_spoken += 1;
        warn!("\"{text}\"");
    }
}
