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

use tokio;
use anyhow::Result;
use clap::Parser;
use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::protocol::Message;
use stratux_common::ws::connect;
use stratux_radar::{records::{RadarMessage, SituationRecord}, situation::Ownship, contact::{Contact, ContactKey}};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "print decoded messages from a Stratux traffic or situation websocket")]
pub struct Args {
    /// decode situation records instead of traffic
    #[arg(short,long)]
    pub situation: bool,

    /// websocket URL, e.g. ws://192.168.10.1/radar
    pub url: String,
}

#[tokio::main]
async fn main()->Result<()> {
    let args = Args::parse();
    let mut ws = connect( &args.url).await?;

    while let Some(msg) = ws.next().await {
        if let Message::Text(txt) = msg? {
            let txt = txt.as_str();
            if args.situation {
                match SituationRecord::decode( txt) {
                    Ok(rec) => {
                        let own = Ownship::from_record( &rec);
                        match own.position {
                            Some(pos) => println!("own {pos} crs {:.0} {}", own.true_course, own.altitude),
                            None => println!("own (no fix) {}", own.altitude)
                        }
                    }
                    Err(e) => println!("PARSE ERROR {e} for {txt}")
                }
            } else {
                match RadarMessage::decode( txt) {
                    Ok(RadarMessage::Traffic(rec)) => {
                        let mut contact = Contact::new( ContactKey::from_record( &rec), 0);
                        contact.update( &rec);
                        println!("{contact}");
                    }
                    Ok(RadarMessage::Settings(settings)) => println!("{settings:?}"),
                    Err(e) => println!("PARSE ERROR {e} for {txt}")
                }
            }
        }
    }
    Ok(())
}
