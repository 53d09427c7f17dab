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

mod common;
use common::*;

use stratux_radar::{
    contact::{AddressKind, Contact, ContactKey, EMA_LAMBDA, exp_moving_average},
    records::TrafficRecord,
};

fn contact_for (rec: &TrafficRecord)->Contact {
    let mut c = Contact::new( ContactKey::from_record( rec), 42);
    c.update( rec);
    c
}

#[test]
fn test_ema_closed_form() {
    let mut rec = unpositioned( 1, 5000, -20.0, 0);
    let mut c = contact_for( &rec);
    assert_eq!( c.smoothed_signal, Some(-20.0)); // first sample

    rec = unpositioned( 1, 5000, -10.0, 200);
    c.update( &rec);

    let expon = (-200.0 / 100.0 * EMA_LAMBDA).exp();
    let expected = -20.0 * expon + -10.0 * (1.0 - expon);
    assert!( (c.smoothed_signal.unwrap() - expected).abs() < 1e-9);
    assert_eq!( c.signal, Some(-10.0));
}

#[test]
fn test_ema_edge_cases() {
    assert_eq!( exp_moving_average( None, None, None), None);
    assert_eq!( exp_moving_average( Some(-12.0), None, Some(100)), Some(-12.0));
    assert_eq!( exp_moving_average( Some(-12.0), Some(f64::NAN), Some(100)), Some(-12.0));
    assert_eq!( exp_moving_average( Some(-12.0), Some(-30.0), None), Some(-30.0));
    assert_eq!( exp_moving_average( Some(-12.0), Some(-30.0), Some(-5)), Some(-30.0));
    assert_eq!( exp_moving_average( Some(-12.0), Some(-30.0), Some(0)), Some(-12.0));

    // a record without signal keeps the average
    let mut c = contact_for( &unpositioned( 1, 5000, -20.0, 0));
    let rec = TrafficRecord { signal_level: None, ..unpositioned( 1, 5000, -20.0, 500) };
    c.update( &rec);
    assert_eq!( c.smoothed_signal, Some(-20.0));
    assert_eq!( c.signal, None);

    // a record without time takes the raw sample, and so does the next one since there is no interval
    let rec = TrafficRecord { timestamp: None, ..unpositioned( 1, 5000, -30.0, 1000) };
    c.update( &rec);
    assert_eq!( c.smoothed_signal, Some(-30.0));
    assert_eq!( c.timestamp, None);

    c.update( &unpositioned( 1, 5000, -10.0, 1500));
    assert_eq!( c.smoothed_signal, Some(-10.0));
    assert_eq!( c.timestamp, Some( at_millis(1500)));
}

#[test]
fn test_field_rounding() {
    let rec = TrafficRecord { alt: 5512, vvel: -449.0, speed: 122.4, track: 93.0, ..positioned( 0x3C4B26, 5500, 1.0, 0) };
    let c = contact_for( &rec);

    assert_eq!( c.key, ContactKey::new( 0x3C4B26, AddressKind::Icao));
    assert_eq!( c.key.to_string(), "3C4B26");
    assert_eq!( c.altitude, 5500);
    assert_eq!( c.vspeed, -400);
    assert_eq!( c.speed, Some(120));
    assert_eq!( c.track.map( |t| t.degrees()), Some(95.0));
    assert!( !c.track_derived);
    assert!( c.is_positioned());

    let rec = TrafficRecord { addr_type: 1, speed_valid: false, ..rec };
    let c = contact_for( &rec);
    assert_eq!( c.key.to_string(), "~3C4B26");
    assert_eq!( c.speed, None);
    assert_eq!( c.track, None);
}

#[test]
fn test_derived_track() {
    let rec = TrafficRecord { speed_valid: false, ..positioned( 5, 5000, 1.0, 0) };
    let mut c = contact_for( &rec);
    assert_eq!( c.track, None);

    // moved east within a second
    let mut rec = TrafficRecord { speed_valid: false, ..positioned( 5, 5000, 1.0, 1000) };
    rec.lng += 0.01;
    c.update( &rec);
    assert!( c.track_derived);
    assert!( (c.track.unwrap().degrees() - 90.0).abs() < 1e-6);

    // too long between positions, we keep the last derived track
    let mut rec2 = TrafficRecord { speed_valid: false, ..positioned( 5, 5000, 2.0, 10_000) };
    rec2.lng = rec.lng;
    c.update( &rec2);
    assert!( (c.track.unwrap().degrees() - 90.0).abs() < 1e-6);
}

#[test]
fn test_timestamps_kept() {
    let mut c = contact_for( &unpositioned( 9, 5000, -20.0, 0));
    let rec = TrafficRecord { last_alt: None, ..unpositioned( 9, 5000, -20.0, 2000) };
    c.update( &rec);

    assert_eq!( c.timestamp, Some( at_millis(2000)));
    assert_eq!( c.last_seen, Some( at_millis(2000)));
    assert_eq!( c.last_alt, Some( t0()));
    assert_eq!( c.serial, 42);
    assert_eq!( c.n_updates, 2);
}
