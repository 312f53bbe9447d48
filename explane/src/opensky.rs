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

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use explane_common::{geo::GeoRect, net::{new_client, send_for_json}};

use crate::{
    aircraft::{AircraftPositionProvider, AircraftState, PositionSource},
    errors::{ExplaneError, Result, input_error, service_error},
    settings::{OpenSkyCredentials, Settings},
};

/// the `/states/all` response of the OpenSky REST API
#[derive(Deserialize,Debug)]
pub struct StatesResponse {
    pub time: i64,
    pub states: Option<Vec<Vec<Value>>>, // null if there are no aircraft in the requested area
}

/// an [`AircraftPositionProvider`] that queries the OpenSky network REST API
pub struct OpenSkyProvider {
    client: Client,
    base_url: String,
    credentials: Option<OpenSkyCredentials>,
}

impl OpenSkyProvider {
    pub fn new (settings: &Settings)->Result<Self> {
        let client = new_client( settings.lookup_timeout)?;
        let base_url = settings.opensky_url.trim_end_matches('/').to_string();
        let credentials = settings.opensky_credentials.clone();

        Ok( OpenSkyProvider { client, base_url, credentials } )
    }

    pub fn states_url (&self)->String {
        format!("{}/states/all", self.base_url)
    }
}

impl AircraftPositionProvider for OpenSkyProvider {
    fn find_in_box (&self, bbox: &GeoRect)->Result<Vec<AircraftState>> {
        let url = self.states_url();
        let mut req = self.client.get( &url).query( &[
            ("lamin", bbox.lat_min), ("lomin", bbox.lon_min),
            ("lamax", bbox.lat_max), ("lomax", bbox.lon_max)
        ]);
        if let Some(creds) = &self.credentials {
            req = req.basic_auth( &creds.user, Some(&creds.password));
        }

        let response: StatesResponse = send_for_json( req, &url)
            .map_err( |e| service_error!("OpenSky API call failed: {}", e))?;
        debug!("OpenSky response time {}", response.time);

        Ok( states_from_response( response) )
    }
}

/// parse a JSON `/states/all` response document
pub fn parse_states (json: &str)->Result<Vec<AircraftState>> {
    let response: StatesResponse = serde_json::from_str( json)?;
    Ok( states_from_response( response) )
}

/// convert all well formed state vectors of the response. Malformed entries are skipped
pub fn states_from_response (response: StatesResponse)->Vec<AircraftState> {
    let Some(states) = response.states else { return Vec::new() };

    states.iter().filter_map( |sv| {
        match parse_state_vector( sv) {
            Ok(state) => Some(state),
            Err(e) => { warn!("ignoring state vector {:?}: {}", sv, e); None }
        }
    }).collect()
}

/// OpenSky state vectors are positional JSON arrays:
///
///   0: icao24 (string)
///   1: callsign (string, 8 chars padded, nullable)
///   2: origin_country (string)
///   3: time_position (epoch seconds, nullable)
///   4: last_contact (epoch seconds)
///   5: longitude (degrees, nullable)
///   6: latitude (degrees, nullable)
///   7: baro_altitude (m, nullable)
///   8: on_ground (bool)
///   9: velocity (m/s over ground, nullable)
///  10: true_track (degrees clockwise from north, nullable)
///  11: vertical_rate (m/s, nullable)
///  12: sensors (int array, nullable)
///  13: geo_altitude (m, nullable)
///  14: squawk (string, nullable)
///  15: spi (bool)
///  16: position_source (int: 0 ADS-B, 1 ASTERIX, 2 MLAT, 3 FLARM)
///  17: category (int, only for extended requests)
///
/// see https://openskynetwork.github.io/opensky-api/rest.html
pub fn parse_state_vector (sv: &[Value])->Result<AircraftState> {
    let icao24 = req_str( sv, 0, "icao24")?;
    let origin_country = req_str( sv, 2, "origin_country")?;
    let last_contact = opt_i64( sv, 4).ok_or_else( || parse_error( "last_contact"))?;
    let code = opt_i64( sv, 16).ok_or_else( || parse_error( "position_source"))?;
    let position_source = PositionSource::from_code( code).ok_or_else( || parse_error( "position_source"))?;

    Ok( AircraftState {
        icao24,
        callsign: opt_str( sv, 1),
        origin_country,
        time_position: opt_i64( sv, 3),
        last_contact,
        longitude: opt_f64( sv, 5),
        latitude: opt_f64( sv, 6),
        baro_altitude: opt_f64( sv, 7),
        on_ground: flag( sv, 8),
        velocity: opt_f64( sv, 9),
        true_track: opt_f64( sv, 10),
        vertical_rate: opt_f64( sv, 11),
        geo_altitude: opt_f64( sv, 13),
        squawk: opt_str( sv, 14),
        spi: flag( sv, 15),
        position_source,
    })
}

fn parse_error (field: &str)->ExplaneError {
    input_error!("missing or invalid state vector field '{}'", field)
}

#[inline] fn opt_f64 (sv: &[Value], i: usize)->Option<f64> { sv.get(i).and_then( Value::as_f64) }
#[inline] fn opt_i64 (sv: &[Value], i: usize)->Option<i64> { sv.get(i).and_then( Value::as_i64) }
#[inline] fn opt_str (sv: &[Value], i: usize)->Option<String> { sv.get(i).and_then( Value::as_str).map( String::from) }
#[inline] fn flag (sv: &[Value], i: usize)->bool { sv.get(i).and_then( Value::as_bool).unwrap_or(false) }

fn req_str (sv: &[Value], i: usize, field: &str)->Result<String> {
    opt_str( sv, i).ok_or_else( || parse_error( field))
}
