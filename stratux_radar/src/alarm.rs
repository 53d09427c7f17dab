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

use std::{fmt, str::FromStr};
use serde::{Serialize,Deserialize};
use stratux_common::angle::Angle360;

/// the configurable constants of the proximity alarm. Radii are given as fractions of the display radius
#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct AlarmPolicy {
    pub max_alarms: u32,        // how often the alert tone is played while a contact stays inside
    pub max_speech_alarms: u32, // how often the contact is announced (should be <= max_alarms)
    pub inner_ratio: f64,       // alarm radius
    pub outer_ratio: f64,       // re-arm radius (hysteresis)
}

impl Default for AlarmPolicy {
    fn default()->Self {
        AlarmPolicy { max_alarms: 5, max_speech_alarms: 1, inner_ratio: 0.5, outer_ratio: 0.75 }
    }
}

/// what the alarm evaluation did
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum AlarmAction {
    Alert { beep: bool, speech: bool }, // inside alarm radius (both flags false once the counts are exhausted)
    Hold,                               // within the hysteresis band, counter unchanged
    Reset,                              // outside re-arm radius, counter reset
}

impl AlarmPolicy {
    pub fn inner_radius (&self, display_radius: f64)->f64 { display_radius * self.inner_ratio }
    pub fn outer_radius (&self, display_radius: f64)->f64 { display_radius * self.outer_ratio }

    /// evaluate a contact at `distance` nm. This is the only place that modifies alarm counters
    pub fn evaluate (&self, alarms: &mut u32, distance: f64, display_radius: f64, sound: SoundMode,
                     announcement: Option<&Announcement>, alerts: &mut dyn AlertSink)->AlarmAction
    {
        if distance <= self.inner_radius( display_radius) {
            let max_speech = self.max_speech_alarms.min( self.max_alarms);
            let speech = sound.speaks() && *alarms < max_speech && announcement.is_some();
            let beep = sound.beeps() && *alarms < self.max_alarms;

            if let (true, Some(a)) = (speech, announcement) { alerts.speak( a.text().as_str()); }
            if beep { alerts.beep(); }

            *alarms = (*alarms + 1).min( self.max_alarms);
            AlarmAction::Alert { beep, speech }

        } else if distance >= self.outer_radius( display_radius) {
            *alarms = 0;
            AlarmAction::Reset

        } else {
            AlarmAction::Hold
        }
    }
}

/// where the alarm output goes (audio device, speech synthesizer, log..)
pub trait AlertSink {
    fn beep (&mut self);
    fn speak (&mut self, text: &str);
}

#[derive(Deserialize,Serialize,Debug,Clone,Copy,PartialEq,Eq,Default)]
pub enum SoundMode {
    #[default]
    BeepAndSpeech,
    Beep,
    Speech,
    Off
}

impl SoundMode {
    pub fn beeps (&self)->bool { matches!( self, SoundMode::BeepAndSpeech | SoundMode::Beep) }
    pub fn speaks (&self)->bool { matches!( self, SoundMode::BeepAndSpeech | SoundMode::Speech) }

    pub fn next (&self)->Self {
        match self {
            SoundMode::BeepAndSpeech => SoundMode::Beep,
            SoundMode::Beep => SoundMode::Speech,
            SoundMode::Speech => SoundMode::Off,
            SoundMode::Off => SoundMode::BeepAndSpeech,
        }
    }

    /// what is announced when switching to this mode
    pub fn status_text (&self)->&'static str {
        match self {
            SoundMode::BeepAndSpeech => "Beep and Speech on",
            SoundMode::Beep => "Beep only",
            SoundMode::Speech => "Speech only",
            SoundMode::Off => "Sound off",
        }
    }
}

impl FromStr for SoundMode {
    type Err = String;

    fn from_str (s: &str)->Result<Self,Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "beep+speech" | "beepandspeech" => Ok(SoundMode::BeepAndSpeech),
            "beep" => Ok(SoundMode::Beep),
            "speech" => Ok(SoundMode::Speech),
            "off" => Ok(SoundMode::Off),
            _ => Err( format!("unknown sound mode '{s}' (use all, beep, speech or off)"))
        }
    }
}

/// spoken traffic advisory
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Announcement {
    pub alt_diff: i32,       // hundreds of ft
    pub clock: Option<u8>,   // 1..12, None if the direction is unknown
}

impl Announcement {
    pub fn text (&self)->String {
        let mut txt = String::from("Traffic ");
        if let Some(oclock) = self.clock { txt.push_str( format!("{oclock} o'clock ").as_str()); }
        let sign = if self.alt_diff < 0 { "minus" } else { "plus" };
        txt.push_str( format!("{sign} {} feet", self.alt_diff.abs() * 100).as_str());
        txt
    }
}

/// clock position (1..12) of a target at true `bearing` relative to our `true_course`
pub fn clock_position (bearing: Angle360, true_course: f64)->u8 {
    let alpha = (bearing - Angle360::from_degrees( true_course)).degrees();
    let oclock = (alpha / 30.0).round() as u8;
    if oclock == 0 { 12 } else { oclock }
}
