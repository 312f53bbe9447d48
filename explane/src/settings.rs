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

use std::{fmt, fs, io, path::{Path, PathBuf}, time::Duration};
use serde::{Serialize,Deserialize};
use uom::si::{f64::Length, length::kilometer};
use explane_common::{datetime::secs, geo::GeoPoint3};

use crate::errors::{Result, config_error};

pub const DEFAULT_SETTINGS_FILE: &str = "explane.ron";
pub const TEST_API_SETTINGS_URL: &str = "https://explanesettingsapi.azurewebsites.net/api/settings/1.11 Test";
pub const OPENSKY_URL: &str = "https://opensky-network.org/api";

#[derive(Deserialize,Serialize,Clone,PartialEq)]
pub struct OpenSkyCredentials {
    pub user: String,
    pub password: String,
}

// settings get logged at startup, never show the password
impl fmt::Debug for OpenSkyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSkyCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// the station configuration. All fields are read once at startup and have defaults so that
/// settings files only need to contain what differs
#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct Settings {
    pub sample_size: usize, // number of consecutive loud samples before we look for aircraft
    pub threshold_decibel: f64,
    pub whisper_decibel: f64, // quiet level the sample window is initialized with

    pub latitude: f64,
    pub longitude: f64,
    pub altitude_meters: f64,

    pub sound_level_meter: String, // device model: "gm1356" or "mock_meter"
    pub device_path: PathBuf, // hidraw device of the meter
    pub mock_range: (u32,u32), // min/max dB(A) for mock_meter

    pub sample_interval: Duration,
    pub cooldown: Duration, // min time between aircraft lookups
    pub search_radius_km: f64,
    pub lookup_timeout: Duration,

    pub opensky_url: String,
    pub opensky_credentials: Option<OpenSkyCredentials>,

    pub settings_api_url: String, // where to look up the registration_url if not set
    pub registration_url: Option<String>,
    pub mac_address: Option<String>, // reported as device serial, resolved from ethernet interface if not set
}

impl Default for Settings {
    fn default()->Self {
        Settings {
            sample_size: 10,
            threshold_decibel: 50.0,
            whisper_decibel: 30.0,

            // Schiphol - there should always be aircraft around
            latitude: 52.3255699,
            longitude: 4.7222645,
            altitude_meters: 1.0,

            sound_level_meter: "gm1356".to_string(),
            device_path: PathBuf::from("/dev/hidraw0"),
            mock_range: (50,100),

            sample_interval: secs(1),
            cooldown: secs(20),
            search_radius_km: 5.0,
            lookup_timeout: secs(10),

            opensky_url: OPENSKY_URL.to_string(),
            opensky_credentials: None,

            settings_api_url: TEST_API_SETTINGS_URL.to_string(),
            registration_url: None,
            mac_address: None,
        }
    }
}

impl Settings {
    pub fn observer_location (&self)->GeoPoint3 {
        GeoPoint3::from_lat_lon_degrees_alt_meters( self.latitude, self.longitude, self.altitude_meters)
    }

    pub fn search_radius (&self)->Length {
        Length::new::<kilometer>( self.search_radius_km)
    }

    pub fn check (&self)->Result<()> {
        if self.sample_size == 0 { return Err( config_error!("sample_size has to be > 0")) }
        if self.sample_interval.is_zero() { return Err( config_error!("sample_interval has to be > 0")) }
        if !self.threshold_decibel.is_finite() { return Err( config_error!("invalid threshold_decibel {}", self.threshold_decibel)) }
        if self.mock_range.0 > self.mock_range.1 { return Err( config_error!("invalid mock_range {:?}", self.mock_range)) }
        if !(self.search_radius_km > 0.0) { return Err( config_error!("search_radius_km has to be > 0")) }
        Ok(())
    }
}

/// parse settings from a RON string
pub fn parse_settings (ron_src: &str)->Result<Settings> {
    let settings: Settings = ron::from_str( ron_src)?;
    settings.check()?;
    Ok(settings)
}

/// load settings from RON file. A missing file is not an error - we just use defaults
pub fn load_settings (path: impl AsRef<Path>)->Result<Settings> {
    match fs::read_to_string( path.as_ref()) {
        Ok(src) => parse_settings( &src),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok( Settings::default() ),
        Err(e) => Err( e.into())
    }
}

/* #region device serial **************************************************************************************/

const SYS_NET: &str = "/sys/class/net";

/// name of the first (sorted) ethernet interface in `net_dir`
pub fn find_ethernet_interface (net_dir: impl AsRef<Path>)->Result<String> {
    let mut names: Vec<String> = fs::read_dir( net_dir.as_ref())?
        .filter_map( |e| e.ok())
        .filter_map( |e| e.file_name().into_string().ok())
        .filter( |name| name.starts_with("eth") || name.starts_with("en"))
        .collect();
    names.sort();

    names.into_iter().next().ok_or_else( || config_error!("could not determine interface name of ethernet device"))
}

/// MAC address of the given interface as reported in `<net_dir>/<interface>/address`
pub fn read_mac_address (net_dir: impl AsRef<Path>, interface: &str)->Result<String> {
    let path = net_dir.as_ref().join( interface).join("address");
    let contents = fs::read_to_string( &path)
        .map_err( |e| config_error!("could not determine MAC address of interface {}: {}", interface, e))?;

    Ok( contents.trim().chars().take(17).collect() )
}

/// the configured MAC address or the one of the first ethernet interface of this machine
pub fn resolve_mac_address (settings: &Settings)->Result<String> {
    if let Some(mac) = &settings.mac_address {
        Ok( mac.clone() )
    } else {
        let interface = find_ethernet_interface( SYS_NET)?;
        read_mac_address( SYS_NET, &interface)
    }
}

/* #endregion device serial */
