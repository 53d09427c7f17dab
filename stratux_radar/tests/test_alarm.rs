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

use stratux_common::angle::Angle360;
use stratux_radar::{
    alarm::{AlarmAction, AlarmPolicy, Announcement, SoundMode, clock_position},
    contact::{AddressKind, ContactKey},
    limits::RadarLimits,
    tracker::{ContactTracker, TrackContext},
};

const RADIUS: f64 = 10.0; // inner 5nm, outer 7.5nm

fn announcement ()->Announcement { Announcement { alt_diff: 5, clock: Some(2) } }

#[test]
fn test_accumulate_and_saturate() {
    let policy = AlarmPolicy::default();
    let mut alerts = RecordingAlerts::default();
    let mut alarms = 0;

    for i in 0..8 {
        let action = policy.evaluate( &mut alarms, 1.0, RADIUS, SoundMode::BeepAndSpeech, Some(&announcement()), &mut alerts);
        if i < 5 {
            assert_eq!( action, AlarmAction::Alert{ beep: true, speech: i == 0 });
        } else {
            assert_eq!( action, AlarmAction::Alert{ beep: false, speech: false });
        }
    }
    assert_eq!( alarms, 5);
    assert_eq!( alerts.beeps, 5);
    assert_eq!( alerts.spoken, vec!["Traffic 2 o'clock plus 500 feet".to_string()]);
}

#[test]
fn test_hysteresis() {
    let policy = AlarmPolicy::default();
    let mut alerts = RecordingAlerts::default();
    let mut alarms = 0;

    policy.evaluate( &mut alarms, 4.0, RADIUS, SoundMode::Beep, None, &mut alerts);
    policy.evaluate( &mut alarms, 4.9, RADIUS, SoundMode::Beep, None, &mut alerts);
    assert_eq!( alarms, 2);

    // between inner and outer radius nothing changes
    assert_eq!( policy.evaluate( &mut alarms, 5.1, RADIUS, SoundMode::Beep, None, &mut alerts), AlarmAction::Hold);
    assert_eq!( policy.evaluate( &mut alarms, 7.4, RADIUS, SoundMode::Beep, None, &mut alerts), AlarmAction::Hold);
    assert_eq!( alarms, 2);
    assert_eq!( alerts.beeps, 2);

    // back inside without crossing the outer radius does not re-arm
    policy.evaluate( &mut alarms, 3.0, RADIUS, SoundMode::Beep, None, &mut alerts);
    assert_eq!( alarms, 3);

    assert_eq!( policy.evaluate( &mut alarms, 7.5, RADIUS, SoundMode::Beep, None, &mut alerts), AlarmAction::Reset);
    assert_eq!( alarms, 0);
    assert_eq!( policy.evaluate( &mut alarms, 25.0, RADIUS, SoundMode::Beep, None, &mut alerts), AlarmAction::Reset);
    assert_eq!( alarms, 0);
}

#[test]
fn test_sound_modes() {
    let policy = AlarmPolicy::default();
    let ann = announcement();

    let mut alerts = RecordingAlerts::default();
    let mut alarms = 0;
    policy.evaluate( &mut alarms, 1.0, RADIUS, SoundMode::Off, Some(&ann), &mut alerts);
    assert_eq!( alarms, 1); // still counted
    assert_eq!( alerts.beeps, 0);
    assert!( alerts.spoken.is_empty());

    let mut alerts = RecordingAlerts::default();
    let mut alarms = 0;
    policy.evaluate( &mut alarms, 1.0, RADIUS, SoundMode::Speech, Some(&ann), &mut alerts);
    policy.evaluate( &mut alarms, 1.0, RADIUS, SoundMode::Speech, Some(&ann), &mut alerts);
    assert_eq!( alerts.beeps, 0);
    assert_eq!( alerts.spoken.len(), 1);

    // no speech without known altitude difference
    let mut alerts = RecordingAlerts::default();
    let mut alarms = 0;
    policy.evaluate( &mut alarms, 1.0, RADIUS, SoundMode::BeepAndSpeech, None, &mut alerts);
    assert_eq!( alerts.beeps, 1);
    assert!( alerts.spoken.is_empty());

    assert_eq!( SoundMode::BeepAndSpeech.next(), SoundMode::Beep);
    assert_eq!( SoundMode::Beep.next(), SoundMode::Speech);
    assert_eq!( SoundMode::Speech.next(), SoundMode::Off);
    assert_eq!( SoundMode::Off.next(), SoundMode::BeepAndSpeech);

    assert_eq!( "all".parse::<SoundMode>(), Ok(SoundMode::BeepAndSpeech));
    assert_eq!( "Beep".parse::<SoundMode>(), Ok(SoundMode::Beep));
    assert!( "loud".parse::<SoundMode>().is_err());
}

#[test]
fn test_clock_position() {
    let deg = Angle360::from_degrees;
    assert_eq!( clock_position( deg(0.0), 0.0), 12);
    assert_eq!( clock_position( deg(90.0), 0.0), 3);
    assert_eq!( clock_position( deg(90.0), 90.0), 12);
    assert_eq!( clock_position( deg(0.0), 90.0), 9);
    assert_eq!( clock_position( deg(350.0), 0.0), 12);
    assert_eq!( clock_position( deg(200.0), 0.0), 7);
    assert_eq!( clock_position( deg(10.0), 340.0), 1); // across north

    assert_eq!( Announcement{ alt_diff: -3, clock: Some(9) }.text(), "Traffic 9 o'clock minus 300 feet");
    assert_eq!( Announcement{ alt_diff: 0, clock: None }.text(), "Traffic plus 0 feet");
}

/// a contact stays inside the alarm radius for three updates, leaves beyond the re-arm radius and comes back
#[test]
fn test_reentry_rearms() {
    let (own, limits, policy) = (own_ship(), RadarLimits::default(), AlarmPolicy::default());
    let ctx = TrackContext { own: &own, limits: &limits, policy: &policy, sound: SoundMode::BeepAndSpeech, unpositioned_alt_factor: 1.3 };
    let mut tracker = ContactTracker::new();
    let mut r = RecordingRenderer::default();
    let mut a = RecordingAlerts::default();
    let key = ContactKey::new( 0xA, AddressKind::Icao);

    for i in 0..3 {
        tracker.handle_traffic( &positioned( 0xA, 5200, 2.0, i * 1000), &ctx, &mut r, &mut a);
    }
    assert_eq!( tracker.get( &key).unwrap().alarms, 3);
    assert_eq!( a.beeps, 3);
    assert_eq!( a.spoken.len(), 1);

    tracker.handle_traffic( &positioned( 0xA, 5200, 8.0, 3000), &ctx, &mut r, &mut a);
    assert_eq!( tracker.get( &key).unwrap().alarms, 0);

    tracker.handle_traffic( &positioned( 0xA, 5200, 2.0, 4000), &ctx, &mut r, &mut a);
    assert_eq!( tracker.get( &key).unwrap().alarms, 1);
    assert_eq!( a.beeps, 4);
    assert_eq!( a.spoken.len(), 2);
}
