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

//! a traffic radar client for Stratux-style ADS-B/UAT receivers. Contacts received over the device traffic
//! websocket are kept in two lists (with and without position), checked against a proximity alarm and evicted
//! once the device stops reporting them. What is shown where goes through a pluggable [`renderer::RadarRenderer`]

use std::{fs, path::Path, time::Duration};
use serde::{Serialize,Deserialize};
use stratux_common::{datetime::{millis, secs, ser_duration_as_fractional_secs, de_duration_from_fractional_secs}, net::with_host};

pub mod errors;
use errors::Result;

pub mod records;
pub mod situation;
pub mod contact;
pub mod limits;
pub mod alarm;
pub mod display;
pub mod renderer;
pub mod tracker;
pub mod session;
pub mod connector;

use limits::RadarLimits;
use alarm::{AlarmPolicy, SoundMode};

/// default device host (the Stratux access point address)
pub const DEFAULT_HOST: &str = "192.168.10.1";

#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct RadarConfig {
    pub traffic_url: String,
    pub situation_url: String,
    pub status_url: String,
    pub settings_url: String,

    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub reconnect_delay: Duration,
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub status_interval: Duration,
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub evict_interval: Duration,
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub http_timeout: Duration,

    /// contacts are evicted once their last report is this old
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub max_last_seen_age: Duration,
    /// contacts without position are also evicted if their last altitude is this old
    #[serde(serialize_with="ser_duration_as_fractional_secs", deserialize_with="de_duration_from_fractional_secs")]
    pub max_last_alt_age: Duration,

    pub limits: RadarLimits,
    pub unpositioned_alt_factor: f64,
    pub alarm: AlarmPolicy,
    pub sound_mode: SoundMode,
}

impl Default for RadarConfig {
    fn default()->Self {
        RadarConfig {
            traffic_url: format!("ws://{DEFAULT_HOST}/radar"),
            situation_url: format!("ws://{DEFAULT_HOST}/situation"),
            status_url: format!("http://{DEFAULT_HOST}/getStatus"),
            settings_url: format!("http://{DEFAULT_HOST}/setSettings"),
            reconnect_delay: secs(1),
            status_interval: millis(500),
            evict_interval: secs(10),
            http_timeout: secs(2),
            max_last_seen_age: secs(59),
            max_last_alt_age: secs(59),
            limits: RadarLimits::default(),
            unpositioned_alt_factor: 1.3,
            alarm: AlarmPolicy::default(),
            sound_mode: SoundMode::BeepAndSpeech,
        }
    }
}

impl RadarConfig {
    /// the same config for a different device host
    pub fn with_host (&self, host: &str)->Self {
        RadarConfig {
            traffic_url: with_host( &self.traffic_url, host),
            situation_url: with_host( &self.situation_url, host),
            status_url: with_host( &self.status_url, host),
            settings_url: with_host( &self.settings_url, host),
            ..self.clone()
        }
    }
}

pub fn load_config<P: AsRef<Path>> (path: P)->Result<RadarConfig> {
    let input = fs::read_to_string( path)?;
    Ok( ron::from_str( input.as_str())? )
}
