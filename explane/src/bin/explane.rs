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

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;
use explane_common::process::{exit, keep_running_until_ctrlc};
use explane::{
    devices::init_device,
    load_settings,
    opensky::OpenSkyProvider,
    registration::{DryRunSink, HttpRegistrationSink, RecordMetadata, RegistrationSink, resolve_registration_url},
    run_sessions,
    settings::{DEFAULT_SETTINGS_FILE, resolve_mac_address},
    SessionContext,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "register aircraft that cause loud noise events near the station")]
pub struct Args {
    /// RON settings file
    #[arg(short,long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// log event records instead of submitting them
    #[arg(long)]
    pub dry_run: bool,
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut settings = load_settings( &args.config)?;

    let mut device = match init_device( &settings) {
        Ok(device) => device,
        Err(e) => {
            eprintln!("device error: {}", e);
            exit(1)
        }
    };

    settings.mac_address = Some( resolve_mac_address( &settings)?);

    let sink: Box<dyn RegistrationSink> = if args.dry_run {
        Box::new( DryRunSink)
    } else {
        let url = resolve_registration_url( &settings)?;
        settings.registration_url = Some( url.clone());
        Box::new( HttpRegistrationSink::new( &settings, url)?)
    };
    info!("settings: {:?}", settings);

    let metadata = RecordMetadata::new( &settings.sound_level_meter, settings.mac_address.as_deref().unwrap_or_default());
    let ctx = SessionContext::new( &settings, metadata)?;
    let provider = OpenSkyProvider::new( &settings)?;
    let keep_running = keep_running_until_ctrlc()?;

    if let Err(e) = run_sessions( &ctx, device.as_mut(), &provider, sink.as_ref(), &keep_running) {
        error!("terminating: {}", e);
        exit(1)
    }

    Ok(())
}
