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

//! projection of contacts into radar screen coordinates. The radar is a circle of [`RADAR_RADIUS_PX`] pixels
//! that represents the display radius, with ownship in the center and north up (the renderer rotates by our
//! true course)

use std::fmt;
use stratux_common::{angle::Angle360, geo::{GeoPos,LocalOffset}, pow2};
use crate::{contact::Contact, situation::Ownship, limits::RadarLimits};

pub const RADAR_RADIUS_PX: f64 = 200.0;

/// rings of contacts without position are never drawn smaller than this
pub const MIN_RING_PX: f64 = 25.0;

/// pixels per nm
#[inline]
pub fn scale (display_radius: f64)->f64 { RADAR_RADIUS_PX / display_radius }

/// distance estimated from smoothed signal strength (dB): 6dB per doubled distance
pub fn estimated_distance_nm (smoothed_signal: f64)->f64 {
    pow2( -smoothed_signal - 6.0) / 30.0
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Climb { Up, Down, Level }

impl Climb {
    pub fn from_vspeed (vspeed: i32)->Self {
        if vspeed > 0 { Climb::Up } else if vspeed < 0 { Climb::Down } else { Climb::Level }
    }
}

/// the altitude annotation of a contact
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum AltLabel {
    Relative { hundreds: i32, climb: Climb },
    Absolute(i32), // ft, used if our own altitude is unknown
    Unspecified,
}

impl fmt::Display for AltLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltLabel::Relative{hundreds,climb} => {
                let sign = if *hundreds < 0 { '-' } else { '+' };
                let arrow = match climb { Climb::Up => "\u{2191}", Climb::Down => "\u{2193}", Climb::Level => "" };
                write!(f, "{}{}{}", sign, hundreds.abs(), arrow)
            }
            AltLabel::Absolute(ft) => write!(f, "{ft}"),
            AltLabel::Unspecified => write!(f, "u/s")
        }
    }
}

/// screen placement of a contact with known position
#[derive(Debug,Clone,PartialEq)]
pub struct MarkerPlacement {
    pub dx: f64,            // px east of center
    pub dy: f64,            // px south of center (screen coordinates)
    pub distance_nm: f64,
    pub bearing: Angle360,  // true bearing from ownship
    pub heading: f64,       // marker rotation, 0 if the contact has no track
    pub label: AltLabel,
}

/// screen placement of a contact without position (a ring around ownship)
#[derive(Debug,Clone,PartialEq)]
pub struct RingPlacement {
    pub radius_px: f64,
    pub distance_nm: f64,
    pub label: AltLabel,
}

/// relative geometry of a positioned contact, None if either position is unknown
pub fn contact_offset (contact: &Contact, own: &Ownship)->Option<LocalOffset> {
    match (own.position, contact.position) {
        (Some(own_pos), Some(pos)) => Some( LocalOffset::between( &own_pos, &pos)),
        _ => None
    }
}

pub fn marker_placement (contact: &Contact, offset: &LocalOffset, label: AltLabel, limits: &RadarLimits)->MarkerPlacement {
    let s = scale( limits.radius_nm());
    MarkerPlacement {
        dx: (s * offset.east_nm()).round(),
        dy: -(s * offset.north_nm()).round(),
        distance_nm: offset.distance_nm(),
        bearing: offset.bearing(),
        heading: contact.track.map( |t| t.degrees()).unwrap_or(0.0),
        label
    }
}

pub fn ring_placement (distance_nm: f64, label: AltLabel, limits: &RadarLimits)->RingPlacement {
    let radius_px = (scale( limits.radius_nm()) * distance_nm).round().max( MIN_RING_PX);
    RingPlacement { radius_px, distance_nm, label }
}

/// relative altitude label if we know our own altitude, absolute otherwise
pub fn alt_label (contact: &Contact, own: &Ownship)->AltLabel {
    match own.altitude_diff( contact.altitude as f64) {
        Some(hundreds) => AltLabel::Relative { hundreds, climb: Climb::from_vspeed( contact.vspeed) },
        None => AltLabel::Absolute( contact.altitude)
    }
}
