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

//! common utilities shared by the stratux radar crates: angles, time, flat-earth geometry,
//! HTTP helpers and the reconnecting websocket loop

pub mod macros;
pub mod angle;
pub mod datetime;
pub mod geo;
pub mod net;
pub mod ws;

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn atan2(y:f64,x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }

/// round `x` to the nearest multiple of `step` (e.g. altitudes to 25ft, speeds to 5kn)
#[inline]
pub fn round_to (x: f64, step: f64) -> f64 {
    (x / step).round() * step
}

/// treat NaN as missing value
#[inline]
pub fn finite (x: Option<f64>) -> Option<f64> {
    x.filter( |v| v.is_finite())
}
