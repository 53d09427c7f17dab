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
use stratux_common::geo::GeoPos;
use crate::records::SituationRecord;

/// GPS horizontal accuracy (m) above which the device reports an invalid fix
pub const INVALID_GPS_ACCURACY: f64 = 19999.0;

/// max age difference (ms) between baro measurement and last GPS time for the baro altitude to be used
pub const MAX_BARO_LAG_MILLIS: i64 = 1000;

/// where our own altitude comes from
#[derive(Debug,Clone,Copy,PartialEq,Default)]
pub enum OwnAltitude {
    Baro(f64), // pressure altitude in ft
    Gps(f64),  // MSL altitude in ft
    #[default]
    Invalid
}

impl OwnAltitude {
    pub fn feet (&self)->Option<f64> {
        match self {
            OwnAltitude::Baro(alt) | OwnAltitude::Gps(alt) => Some(*alt),
            OwnAltitude::Invalid => None
        }
    }
}

impl fmt::Display for OwnAltitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnAltitude::Baro(alt) => write!(f, "FL{:.0} (baro)", alt / 100.0),
            OwnAltitude::Gps(alt) => write!(f, "FL{:.0} (gps)", alt / 100.0),
            OwnAltitude::Invalid => write!(f, "FL---")
        }
    }
}

/// the ownship state we need for relative traffic display
#[derive(Debug,Clone,Copy,PartialEq,Default)]
pub struct Ownship {
    pub position: Option<GeoPos>, // only set if we have a valid GPS fix
    pub true_course: f64,
    pub altitude: OwnAltitude,
}

impl Ownship {
    pub fn from_record (rec: &SituationRecord)->Self {
        let gps_valid = rec.gps_horizontal_accuracy.map( |acc| acc <= INVALID_GPS_ACCURACY).unwrap_or(false);

        let baro_ok = match (rec.baro_last_measurement_time, rec.gps_last_gps_time, rec.baro_pressure_altitude) {
            (Some(press_time), Some(gps_time), Some(alt)) => {
                alt.is_finite() && (gps_time - press_time).num_milliseconds() < MAX_BARO_LAG_MILLIS
            }
            _ => false
        };

        let altitude = if baro_ok {
            OwnAltitude::Baro( rec.baro_pressure_altitude.unwrap_or_default().round())
        } else if gps_valid {
            OwnAltitude::Gps( rec.gps_altitude_msl)
        } else {
            OwnAltitude::Invalid
        };

        let position = if gps_valid {
            Some( GeoPos::new( rec.gps_latitude, rec.gps_longitude)).filter( |p| p.is_valid())
        } else {
            None
        };

        Ownship { position, true_course: rec.gps_true_course, altitude }
    }

    pub fn has_valid_altitude (&self)->bool { self.altitude.feet().is_some() }

    /// altitude difference in hundreds of feet (positive if target is above us), or None if our own altitude is invalid
    pub fn altitude_diff (&self, target_alt_ft: f64)->Option<i32> {
        self.altitude.feet().map( |own| ((target_alt_ft - own) / 100.0).round() as i32)
    }
}
