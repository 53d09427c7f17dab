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

use chrono::{DateTime, Utc};
use serde::{Deserialize,Serializer,Deserializer};
use std::time::Duration;

// for simple use cases that do not require to handle leap seconds and the like we provide our own wrappers
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

/// age of `dt` relative to `now`, saturating at zero for dates in the future of `now`
pub fn age_at (now: &DateTime<Utc>, dt: &DateTime<Utc>)->Duration {
    (*now - *dt).to_std().unwrap_or(Duration::ZERO)
}

/// the "HH:MM:SSZ" representation used in traffic lists
pub fn utc_time_string (dt: &DateTime<Utc>)->String {
    dt.format("%H:%M:%SZ").to_string()
}

pub fn ser_duration_as_fractional_secs<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let secs = dur.as_secs_f64();
    s.serialize_f64( secs)
}

pub fn de_duration_from_fractional_secs <'a,D>(deserializer: D) -> Result<Duration,D::Error> where D: Deserializer<'a> {
    let secs: f64 = f64::deserialize(deserializer)?;
    if secs.is_finite() && secs >= 0.0 {
        Ok( Duration::from_secs_f64(secs) )
    } else {
        Err( serde::de::Error::custom(format!("invalid duration: {secs}")))
    }
}

/// lenient RFC3339 date parsing for feeds that send empty strings or garbage for unset times.
/// Use with `#[serde(default, deserialize_with="de_lenient_datetime")]`
pub fn de_lenient_datetime <'a,D>(deserializer: D) -> Result<Option<DateTime<Utc>>,D::Error> where D: Deserializer<'a> {
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok( s.and_then( |s| DateTime::parse_from_rfc3339( s.as_str()).ok()).map( |dt| dt.with_timezone(&Utc)) )
}
