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
use serde::{Serialize,Deserialize};
use reqwest::Client;
use stratux_common::net::post_json;

use crate::{records::SettingsRecord, errors::Result};

/// selectable display radius values in nm
pub const RANGE_STEPS: [u32;5] = [2, 5, 10, 20, 40];

/// selectable altitude band values in hundreds of ft
pub const ALT_STEPS: [u32;6] = [5, 10, 20, 50, 100, 500];

/// what is displayed: targets within `display_radius` nm and +/- `alt_diff_threshold` hundreds of feet
#[derive(Deserialize,Serialize,Debug,Clone,Copy,PartialEq)]
pub struct RadarLimits {
    pub display_radius: u32,
    pub alt_diff_threshold: u32,
}

impl Default for RadarLimits {
    fn default()->Self {
        RadarLimits { display_radius: 10, alt_diff_threshold: 20 }
    }
}

impl fmt::Display for RadarLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}nm ±{}00ft", self.display_radius, self.alt_diff_threshold)
    }
}

impl RadarLimits {
    /// display radius as float for distance computations
    #[inline] pub fn radius_nm (&self)->f64 { self.display_radius as f64 }

    pub fn new (display_radius: u32, alt_diff_threshold: u32)->Self { RadarLimits{ display_radius, alt_diff_threshold } }

    // note the step functions keep values that are not one of the steps (e.g. set through the device settings)

    pub fn zoom_in (&self)->Self {
        let display_radius = step_down( &RANGE_STEPS, self.display_radius);
        RadarLimits { display_radius, ..*self }
    }

    pub fn zoom_out (&self)->Self {
        let display_radius = step_up( &RANGE_STEPS, self.display_radius);
        RadarLimits { display_radius, ..*self }
    }

    pub fn alt_more (&self)->Self {
        let alt_diff_threshold = step_up( &ALT_STEPS, self.alt_diff_threshold);
        RadarLimits { alt_diff_threshold, ..*self }
    }

    pub fn alt_less (&self)->Self {
        let alt_diff_threshold = step_down( &ALT_STEPS, self.alt_diff_threshold);
        RadarLimits { alt_diff_threshold, ..*self }
    }

    /// merge settings reported by the device (missing values keep the current ones)
    pub fn with_settings (&self, settings: &SettingsRecord)->Self {
        let mut limits = *self;
        if let Some(ft) = settings.radar_limits.filter( |v| *v >= 0) {
            limits.alt_diff_threshold = ((ft as f64) / 100.0).round() as u32;
        }
        if let Some(nm) = settings.radar_range.filter( |v| *v > 0) {
            limits.display_radius = nm as u32;
        }
        limits
    }

    pub fn to_settings (&self)->SettingsRecord {
        SettingsRecord {
            radar_limits: Some( self.alt_diff_threshold as i64 * 100),
            radar_range: Some( self.display_radius as i64)
        }
    }
}

fn step_up<T: PartialEq + Copy> (steps: &[T], v: T)->T {
    match steps.iter().position( |s| *s == v) {
        Some(i) if i+1 < steps.len() => steps[i+1],
        _ => v
    }
}

fn step_down<T: PartialEq + Copy> (steps: &[T], v: T)->T {
    match steps.iter().position( |s| *s == v) {
        Some(i) if i > 0 => steps[i-1],
        _ => v
    }
}

/// tell the device about new limits so that it can adapt what it sends us
pub async fn post_limits (client: &Client, url: &str, limits: &RadarLimits)->Result<()> {
    Ok( post_json( client, url, &limits.to_settings()).await? )
}
