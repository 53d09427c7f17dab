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

use chrono::{DateTime,Utc};
use stratux_radar::{
    records::{RadarMessage, SettingsRecord, SituationRecord, StatusRecord, TrafficRecord},
    situation::{OwnAltitude, Ownship},
    limits::RadarLimits,
};

const TRAFFIC: &str = r#"{"Icao_addr":11160850,"Reg":"N501DG","Tail":"N501DG","Emitter_category":1,"SurfaceVehicleType":0,"OnGround":false,"Addr_type":0,"TargetType":1,"SignalLevel":-28.41,"SignalLevelHist":[-28.4,-27.9],"Squawk":1200,"Position_valid":true,"Lat":37.41983,"Lng":-122.06117,"Alt":3425,"GnssDiffFromBaroAlt":125,"AltIsGNSS":false,"NIC":8,"NACp":9,"Track":272,"TurnRate":0,"Speed":101,"Speed_valid":true,"Vvel":-256,"Timestamp":"2026-05-01T12:00:01.250Z","PriorityStatus":0,"Age":0.6,"AgeLastAlt":0.6,"Last_seen":"0001-01-01T00:49:13.3Z","Last_alt":"0001-01-01T00:49:13.3Z","Last_GnssDiff":"0001-01-01T00:49:12Z","Last_speed":"0001-01-01T00:49:13Z","Last_source":1,"ExtrapolatedPosition":false,"BearingDist_valid":true,"Bearing":212.5,"Distance":4630.0,"DistanceEstimated":0,"ReceivedMsgs":312,"IsStratux":false}"#;

const NON_ICAO: &str = r#"{"Icao_addr":2837120,"Addr_type":1,"TargetType":4,"SignalLevel":null,"Position_valid":false,"Alt":4500,"Speed_valid":false,"Timestamp":"not a date"}"#;

const SITUATION: &str = r#"{"GPSLastFixSinceMidnightUTC":43200.5,"GPSLatitude":37.4,"GPSLongitude":-122.1,"GPSFixQuality":2,"GPSHeightAboveEllipsoid":180.4,"GPSGeoidSep":-105,"GPSSatellites":11,"GPSHorizontalAccuracy":3.2,"GPSNACp":10,"GPSAltitudeMSL":3150.3,"GPSVerticalAccuracy":5.1,"GPSTrueCourse":45.5,"GPSTurnRate":0,"GPSGroundSpeed":98,"GPSTime":"2026-05-01T12:00:01Z","GPSLastGPSTimeStratuxTime":"2026-05-01T12:00:01.400Z","BaroTemperature":24.1,"BaroPressureAltitude":3020.4,"BaroVerticalSpeed":-40,"BaroLastMeasurementTime":"2026-05-01T12:00:01.100Z","AHRSPitch":1.2}"#;

fn t (s: &str)->DateTime<Utc> { DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc) }

#[test]
fn test_decode_traffic() {
    match RadarMessage::decode( TRAFFIC).unwrap() {
        RadarMessage::Traffic(rec) => {
            println!("{rec}");
            assert_eq!( rec.icao_addr, 0xAA4D12);
            assert_eq!( rec.tail, "N501DG");
            assert_eq!( rec.signal_level, Some(-28.41));
            assert!( rec.position_valid);
            assert_eq!( rec.alt, 3425);
            assert_eq!( rec.timestamp, Some( t("2026-05-01T12:00:01.250Z")));
            assert!( rec.last_seen.is_some());
            assert_eq!( rec.distance, 4630.0);
        }
        other => panic!("wrong message type: {other:?}")
    }

    match RadarMessage::decode( NON_ICAO).unwrap() {
        RadarMessage::Traffic(rec) => {
            assert_eq!( rec.addr_type, 1);
            assert_eq!( rec.signal_level, None);
            assert_eq!( rec.timestamp, None); // unparsable dates are treated as missing
            assert!( !rec.speed_valid);
            assert_eq!( rec.tail, "");
        }
        other => panic!("wrong message type: {other:?}")
    }
}

#[test]
fn test_decode_settings() {
    let msg = RadarMessage::decode( r#"{"RadarLimits":5000,"RadarRange":5}"#).unwrap();
    let expected = SettingsRecord { radar_limits: Some(5000), radar_range: Some(5) };
    assert_eq!( msg, RadarMessage::Settings(expected));

    let msg = RadarMessage::decode( r#"{"RadarRange":20}"#).unwrap();
    if let RadarMessage::Settings(settings) = msg {
        assert_eq!( RadarLimits::default().with_settings( &settings), RadarLimits::new( 20, 20));
    } else {
        panic!("not a settings message");
    }
}

#[test]
fn test_decode_errors() {
    assert!( RadarMessage::decode( "{\"Icao_addr\": ").is_err());
    assert!( RadarMessage::decode( "[1,2,3]").is_err());
    assert!( RadarMessage::decode( r#"{"Icao_addr":"abc"}"#).is_err());
    assert!( SituationRecord::decode( "nope").is_err());
}

#[test]
fn test_situation_altitude_source() {
    let rec = SituationRecord::decode( SITUATION).unwrap();
    let own = Ownship::from_record( &rec);
    assert_eq!( own.altitude, OwnAltitude::Baro(3020.0)); // baro measured 300ms before last GPS time
    assert_eq!( own.true_course, 45.5);
    assert!( own.position.is_some());
    assert_eq!( own.altitude_diff( 3525.0), Some(5));
    assert!( own.has_valid_altitude());

    // stale baro falls back to GPS
    let rec2 = SituationRecord { baro_last_measurement_time: Some( t("2026-05-01T12:00:00.000Z")), ..rec.clone() };
    assert_eq!( Ownship::from_record( &rec2).altitude, OwnAltitude::Gps(3150.3));

    // no fix
    let rec3 = SituationRecord { gps_horizontal_accuracy: Some(999999.0), ..rec2 };
    let own = Ownship::from_record( &rec3);
    assert_eq!( own.altitude, OwnAltitude::Invalid);
    assert!( own.position.is_none());
    assert_eq!( own.altitude_diff( 3525.0), None);
    assert!( !own.has_valid_altitude());
}

#[test]
fn test_status() {
    let status: StatusRecord = serde_json::from_str( r#"{"Version":"v1.6r1","UptimeClock":"0001-01-01T01:02:03.5Z","Clock":"2026-05-01T12:00:00Z","GPS_connected":true,"CPUTemp":51.2}"#).unwrap();
    assert_eq!( status.uptime_clock, Some( t("0001-01-01T01:02:03.5Z")));
    assert!( status.gps_connected);
}
