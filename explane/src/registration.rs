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

use chrono::{DateTime, Local};
use reqwest::blocking::Client;
use serde::{Serialize, Deserialize};
use tracing::info;
use explane_common::{
    datetime::{compact_date, epoch_secs, local_now, time_of_day},
    geo::GeoPoint3,
    net::{get_json, new_client, post_json_str},
    round_to,
};

use crate::{
    aircraft::{AircraftState, PositionSource},
    errors::{Result, service_error},
    sampler::SampleWindow,
    settings::Settings,
    APP_VERSION, DEVICE_PLATFORM, VERSION,
};

/// the flat registration record we submit for each accepted detection. Field names are
/// the (camel case) attribute names of the registration API
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub app_version: String,
    pub average_sample_rollup_duration_in_ms: u64,
    pub calculated_plane_distance: i64,
    pub capture_formatted_date: String,
    pub capture_formatted_time: String,
    pub capture_timestamp: i64,
    pub capture_type: String,
    pub decibels_array: Vec<f64>,
    pub device_cordova: String,
    pub device_is_virtual: bool,
    pub device_manufacturer: String,
    pub device_model: String,
    pub device_platform: String,
    pub device_serial: String,
    pub device_version: String,
    pub max_decibels: f64,
    pub my_alt: f64,
    pub my_lat: f64,
    pub my_lng: f64,
    pub plane_alt: Option<f64>,
    pub plane_callsign: String,
    pub plane_country: String,
    pub plane_icao24: String,
    pub plane_lat: Option<f64>,
    pub plane_lng: Option<f64>,
    pub plane_on_ground: bool,
    pub plane_position_source: PositionSource,
    pub plane_spi: bool,
    pub plane_squawk: Option<String>,
    pub plane_time_position: Option<i64>,
    pub plane_true_track: Option<f64>,
    pub plane_velocity: Option<f64>,
    pub plane_vertical_rate: Option<f64>,
    pub sample_duration_in_ms: u64,
}

impl EventRecord {
    pub fn to_json (&self)->Result<String> {
        Ok( serde_json::to_string( self)? )
    }
}

/// the station specific parts of an [`EventRecord`]
#[derive(Debug,Clone,PartialEq)]
pub struct RecordMetadata {
    pub device_model: String,
    pub device_serial: String,
}

impl RecordMetadata {
    pub fn new (device_model: impl ToString, device_serial: impl ToString)->Self {
        RecordMetadata { device_model: device_model.to_string(), device_serial: device_serial.to_string() }
    }
}

/// assembles [`EventRecord`]s. Callers have to make sure there is a matched aircraft and a
/// distance before building - there are no partial records
#[derive(Debug,Clone)]
pub struct EventRecordBuilder {
    metadata: RecordMetadata,
}

impl EventRecordBuilder {
    pub fn new (metadata: RecordMetadata)->Self { EventRecordBuilder { metadata } }

    pub fn build (&self, observer: &GeoPoint3, window: &SampleWindow, matched: &AircraftState, distance_meters: f64)->EventRecord {
        self.build_at( local_now(), observer, window, matched, distance_meters)
    }

    /// build with an explicit capture time
    pub fn build_at (&self, now: DateTime<Local>, observer: &GeoPoint3, window: &SampleWindow, matched: &AircraftState, distance_meters: f64)->EventRecord {
        let rollup_ms = window.sample_interval().as_millis() as u64;

        EventRecord {
            app_version: APP_VERSION.to_string(),
            average_sample_rollup_duration_in_ms: rollup_ms,
            calculated_plane_distance: distance_meters.round_ties_even() as i64,
            capture_formatted_date: compact_date( &now),
            capture_formatted_time: time_of_day( &now),
            capture_timestamp: epoch_secs( &now),
            capture_type: "automatic".to_string(),
            decibels_array: window.values(),
            device_cordova: String::new(),
            device_is_virtual: false,
            device_manufacturer: String::new(),
            device_model: self.metadata.device_model.clone(),
            device_platform: DEVICE_PLATFORM.to_string(),
            device_serial: self.metadata.device_serial.clone(),
            device_version: VERSION.to_string(),
            max_decibels: window.max(),
            my_alt: observer.alt,
            my_lat: round_to( observer.lat, 2),
            my_lng: round_to( observer.lon, 2),
            plane_alt: matched.geo_altitude,
            plane_callsign: matched.trimmed_callsign().to_string(),
            plane_country: matched.origin_country.clone(),
            plane_icao24: matched.icao24.clone(),
            plane_lat: matched.latitude,
            plane_lng: matched.longitude,
            plane_on_ground: matched.on_ground,
            plane_position_source: matched.position_source,
            plane_spi: matched.spi,
            plane_squawk: matched.squawk.clone(),
            plane_time_position: matched.time_position,
            plane_true_track: matched.true_track,
            plane_velocity: matched.velocity,
            plane_vertical_rate: matched.vertical_rate,
            sample_duration_in_ms: rollup_ms * window.len() as u64,
        }
    }
}

/* #region sinks ***********************************************************************************************/

/// where accepted event records go
pub trait RegistrationSink {
    fn submit (&self, record: &EventRecord)->Result<()>;
}

/// POSTs records as JSON to the registration API
pub struct HttpRegistrationSink {
    client: Client,
    url: String,
}

impl HttpRegistrationSink {
    pub fn new (settings: &Settings, url: String)->Result<Self> {
        let client = new_client( settings.lookup_timeout)?;
        Ok( HttpRegistrationSink { client, url } )
    }

    pub fn url (&self)->&str { self.url.as_str() }
}

impl RegistrationSink for HttpRegistrationSink {
    fn submit (&self, record: &EventRecord)->Result<()> {
        let json = record.to_json()?;
        info!("will send this to API: {}", json);

        post_json_str( &self.client, &self.url, json)
            .map_err( |e| service_error!("failed to submit registration to API: {}", e))?;
        Ok(())
    }
}

/// only logs records, used for `--dry-run`
pub struct DryRunSink;

impl RegistrationSink for DryRunSink {
    fn submit (&self, record: &EventRecord)->Result<()> {
        info!("dry run - not submitting: {}", record.to_json()?);
        Ok(())
    }
}

/* #endregion sinks */

/* #region registration url lookup ****************************************************************************/

/// one row of the settings API table
#[derive(Deserialize,Debug,Clone)]
pub struct SettingsRow {
    #[serde(rename = "RowKey", default)]
    pub row_key: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

pub const REGISTER_FUNCTION_KEY: &str = "RegisterFunction";

pub fn find_registration_url (rows: &[SettingsRow])->Option<String> {
    rows.iter()
        .find( |row| row.row_key.as_deref() == Some(REGISTER_FUNCTION_KEY))
        .and_then( |row| row.value.clone())
}

/// the configured registration url or the one published by the settings API
pub fn resolve_registration_url (settings: &Settings)->Result<String> {
    if let Some(url) = &settings.registration_url {
        return Ok( url.clone() )
    }

    let client = new_client( settings.lookup_timeout)?;
    let rows: Vec<SettingsRow> = get_json( &client, &settings.settings_api_url)
        .map_err( |e| service_error!("failed to retrieve API settings: {}", e))?;

    find_registration_url( &rows).ok_or_else( || service_error!("could not find registration URL"))
}

/* #endregion registration url lookup */
