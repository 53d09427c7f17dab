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

//! the JSON records exchanged with the receiver device. Field names follow the device firmware, all
//! fields are optional on input (missing values take their defaults) and unknown fields are ignored.

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use serde_json::Value;
use stratux_common::datetime::de_lenient_datetime;

use crate::errors::{Result,RadarError,parse_error};

/// a traffic report as sent by the device traffic/radar websocket
#[derive(Deserialize,Debug,Clone,Default,PartialEq)]
#[serde(default)]
pub struct TrafficRecord {
    #[serde(rename="Icao_addr")] pub icao_addr: u32,
    #[serde(rename="Addr_type")] pub addr_type: u8,   // 1: non-ICAO, everything else: ICAO
    #[serde(rename="Tail")] pub tail: String,
    #[serde(rename="TargetType")] pub target_type: u8,
    #[serde(rename="SignalLevel")] pub signal_level: Option<f64>, // dB RSSI
    #[serde(rename="Position_valid")] pub position_valid: bool,
    #[serde(rename="Lat")] pub lat: f64,
    #[serde(rename="Lng")] pub lng: f64,
    #[serde(rename="Alt")] pub alt: i32,                // pressure altitude in ft
    #[serde(rename="Speed")] pub speed: f64,            // kn
    #[serde(rename="Speed_valid")] pub speed_valid: bool,
    #[serde(rename="Track")] pub track: f64,            // deg true
    #[serde(rename="Vvel")] pub vvel: f64,              // ft/min

    #[serde(rename="Timestamp", deserialize_with="de_lenient_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename="Last_seen", deserialize_with="de_lenient_datetime")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(rename="Last_alt", deserialize_with="de_lenient_datetime")]
    pub last_alt: Option<DateTime<Utc>>,

    #[serde(rename="Distance")] pub distance: f64,      // m, as computed by the device
    #[serde(rename="Age")] pub age: f64,                // s
    #[serde(rename="AgeLastAlt")] pub age_last_alt: f64 // s
}

impl fmt::Display for TrafficRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "TrafficRecord( addr: {:06X}/{}", self.icao_addr, self.addr_type)?;
        if !self.tail.is_empty() { write!( f, ", tail: \"{}\"", self.tail)?; }
        if self.position_valid { write!( f, ", pos: [{:.5},{:.5}]", self.lat, self.lng)?; }
        write!( f, ", alt: {}", self.alt)?;
        if self.speed_valid { write!( f, ", spd: {:.0}, trk: {:.0}", self.speed, self.track)?; }
        if let Some(sig) = self.signal_level { write!( f, ", sig: {sig:.1}")?; }
        write!( f, ")")
    }
}

/// radar limits as reported by (and posted to) the device
#[derive(Deserialize,Serialize,Debug,Clone,Copy,Default,PartialEq)]
pub struct SettingsRecord {
    #[serde(rename="RadarLimits", skip_serializing_if="Option::is_none")]
    pub radar_limits: Option<i64>, // altitude band in ft
    #[serde(rename="RadarRange", skip_serializing_if="Option::is_none")]
    pub radar_range: Option<i64>,  // display radius in nm
}

/// what we can receive on the radar websocket
#[derive(Debug,Clone,PartialEq)]
pub enum RadarMessage {
    Settings(SettingsRecord),
    Traffic(TrafficRecord),
}

impl RadarMessage {
    pub fn decode (msg: &str)->Result<Self> {
        let value: Value = serde_json::from_str(msg)?;

        if let Value::Object(map) = &value {
            if map.contains_key("RadarLimits") || map.contains_key("RadarRange") {
                Ok( RadarMessage::Settings( serde_json::from_value(value)?) )
            } else {
                Ok( RadarMessage::Traffic( serde_json::from_value(value)?) )
            }
        } else {
            Err( parse_error!("radar message is not an object: {}", msg))
        }
    }
}

/// ownship situation as sent by the device situation websocket
#[derive(Deserialize,Debug,Clone,Default,PartialEq)]
#[serde(default)]
pub struct SituationRecord {
    #[serde(rename="GPSLatitude")] pub gps_latitude: f64,
    #[serde(rename="GPSLongitude")] pub gps_longitude: f64,
    #[serde(rename="GPSTrueCourse")] pub gps_true_course: f64,
    #[serde(rename="GPSAltitudeMSL")] pub gps_altitude_msl: f64,
    #[serde(rename="GPSHorizontalAccuracy")] pub gps_horizontal_accuracy: Option<f64>,
    #[serde(rename="BaroPressureAltitude")] pub baro_pressure_altitude: Option<f64>,

    #[serde(rename="BaroLastMeasurementTime", deserialize_with="de_lenient_datetime")]
    pub baro_last_measurement_time: Option<DateTime<Utc>>,
    #[serde(rename="GPSLastGPSTimeStratuxTime", deserialize_with="de_lenient_datetime")]
    pub gps_last_gps_time: Option<DateTime<Utc>>,
}

impl SituationRecord {
    pub fn decode (msg: &str)->Result<Self> {
        Ok( serde_json::from_str(msg)? )
    }
}

/// the part of the device status we need (the device clock that drives stale contact eviction)
#[derive(Deserialize,Debug,Clone,Default,PartialEq)]
#[serde(default)]
pub struct StatusRecord {
    #[serde(rename="UptimeClock", deserialize_with="de_lenient_datetime")]
    pub uptime_clock: Option<DateTime<Utc>>,
    #[serde(rename="Clock", deserialize_with="de_lenient_datetime")]
    pub clock: Option<DateTime<Utc>>,
    #[serde(rename="GPS_connected")]
    pub gps_connected: bool,
}
