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
use kanal::bounded_async;
use tracing::{info,warn};
use tracing_subscriber::{fmt, EnvFilter};
use stratux_radar::{
    load_config, RadarConfig, alarm::SoundMode, connector::{RadarCmd, RadarConnector}, limits::RadarLimits,
    renderer::{LogAlerts, LogRenderer},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "traffic radar monitor for Stratux devices, logs contacts and proximity alarms")]
pub struct Args {
    /// RON config file (built-in defaults if not set)
    #[arg(short,long)]
    pub config: Option<String>,

    /// device host[:port], overrides the host of all configured URLs
    #[arg(long)]
    pub host: Option<String>,

    /// display radius in nm
    #[arg(short,long)]
    pub range: Option<u32>,

    /// altitude band in hundreds of ft
    #[arg(short,long)]
    pub alt: Option<u32>,

    /// sound mode (all, beep, speech, off)
    #[arg(short,long)]
    pub sound: Option<SoundMode>,

    /// max number of positions kept per contact trace
    #[arg(long, default_value_t = 100)]
    pub max_trace: usize,
}

#[tokio::main]
async fn main()->Result<()> {
    fmt().with_env_filter( EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut config: RadarConfig = match &args.config {
        Some(path) => load_config( path)?,
        None => RadarConfig::default()
    };
    if let Some(host) = &args.host { config = config.with_host( host) }
    if let Some(sound) = args.sound { config.sound_mode = sound }

    let mut limits = config.limits;
    if let Some(range) = args.range { limits.display_radius = range }
    if let Some(alt) = args.alt { limits.alt_diff_threshold = alt }

    info!("monitoring traffic from {}", config.traffic_url);
    let (tx, rx) = bounded_async::<RadarCmd>( 8);
    if limits != config.limits { // tell the device
        tx.send( RadarCmd::SetLimits(limits)).await?;
    }

    let mut connector = RadarConnector::new( config, LogRenderer::new( args.max_trace), LogAlerts::default())?;

    tokio::spawn( async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            if tx.send( RadarCmd::Terminate).await.is_err() { warn!("connector already terminated") }
        }
    });

    connector.run( rx).await?;

    let tracker = connector.session().tracker();
    info!("{} contacts with position, {} without", tracker.positioned().len(), tracker.unpositioned().len());
    Ok(())
}
