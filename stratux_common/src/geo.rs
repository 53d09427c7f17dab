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

/// this module provides the short range geometry used for traffic displays. Targets of interest are within
/// a few dozen nautical miles of ownship, which lets us use a local flat-earth approximation (equirectangular
/// projection around the mean latitude) instead of full ellipsoid computations.
/// Lengths are [uom](https://docs.rs/uom/latest/uom/) quantities so that callers can pick their display units.

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::f64::Length;
use uom::si::length::{meter,nautical_mile};

use crate::angle::{radians_rel, Angle360};
use crate::{pow2, sqrt, atan2};

/// mean earth radius in meters
pub const MEAN_EARTH_RADIUS: f64 = 6371008.8;

/// a geodetic position in degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPos {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPos {
    pub fn new (lat: f64, lon: f64)->Self { GeoPos{lat,lon} }

    pub fn is_valid (&self)->bool {
        self.lat.is_finite() && self.lon.is_finite() && self.lat.abs() <= 90.0 && self.lon.abs() <= 180.0
    }
}

impl fmt::Display for GeoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5}]", self.lat, self.lon)
    }
}

/// north/east offset of a target relative to a reference position
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct LocalOffset {
    pub north: Length,
    pub east: Length,
}

impl LocalOffset {
    pub fn between (reference: &GeoPos, target: &GeoPos)->Self {
        let avg_lat = radians_rel( (reference.lat + target.lat) / 2.0);
        let north = radians_rel( target.lat - reference.lat) * MEAN_EARTH_RADIUS;
        let east = radians_rel( target.lon - reference.lon) * MEAN_EARTH_RADIUS * avg_lat.cos().abs();

        LocalOffset {
            north: Length::new::<meter>(north),
            east: Length::new::<meter>(east),
        }
    }

    #[inline] pub fn north_nm (&self)->f64 { self.north.get::<nautical_mile>() }
    #[inline] pub fn east_nm (&self)->f64 { self.east.get::<nautical_mile>() }

    pub fn distance (&self)->Length {
        let n = self.north.get::<meter>();
        let e = self.east.get::<meter>();
        Length::new::<meter>( sqrt( pow2(n) + pow2(e)))
    }

    pub fn distance_nm (&self)->f64 { self.distance().get::<nautical_mile>() }

    /// true bearing from reference to target
    pub fn bearing (&self)->Angle360 {
        Angle360::from_radians( atan2( self.east.get::<meter>(), self.north.get::<meter>()))
    }
}
