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

use std::fmt;
use serde::{Serialize,Deserialize};
use serde_repr::{Serialize_repr,Deserialize_repr};
use explane_common::geo::{GeoPoint3, GeoRect};

use crate::errors::Result;

/// origin of a reported aircraft position
#[derive(Serialize_repr,Deserialize_repr,Debug,Clone,Copy,PartialEq,Eq)]
#[repr(u8)]
pub enum PositionSource {
    AdsB = 0,
    Asterix = 1,
    Mlat = 2,
    Flarm = 3,
}

impl PositionSource {
    pub fn from_code (code: i64)->Option<Self> {
        match code {
            0 => Some(PositionSource::AdsB),
            1 => Some(PositionSource::Asterix),
            2 => Some(PositionSource::Mlat),
            3 => Some(PositionSource::Flarm),
            _ => None
        }
    }
}

/// immutable snapshot of an aircraft state as reported by an [`AircraftPositionProvider`].
/// All position and kinematic fields are optional since providers report whatever the last
/// received transponder messages contained. Units are SI (meters, m/s, degrees)
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct AircraftState {
    pub icao24: String,
    pub callsign: Option<String>, // might be padded with whitespace
    pub origin_country: String,

    pub time_position: Option<i64>, // epoch seconds of last position update
    pub last_contact: i64,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub geo_altitude: Option<f64>,

    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,

    pub squawk: Option<String>,
    pub spi: bool,
    pub position_source: PositionSource,
}

impl AircraftState {
    /// the 3D position if latitude, longitude and (geometric) altitude are all known
    pub fn position (&self)->Option<GeoPoint3> {
        match (self.latitude, self.longitude, self.geo_altitude) {
            (Some(lat),Some(lon),Some(alt)) => Some( GeoPoint3::from_lat_lon_degrees_alt_meters( lat, lon, alt)),
            _ => None
        }
    }

    pub fn trimmed_callsign (&self)->&str {
        self.callsign.as_deref().map( str::trim).unwrap_or("")
    }

    /// aircraft identity is the transponder address, not the (time dependent) state
    pub fn is_same_aircraft (&self, other: &AircraftState)->bool {
        self.icao24 == other.icao24
    }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "AircraftState( icao24: {}", self.icao24)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{}\"", cs.trim())?; }
        write!( f, ", country: {}", self.origin_country)?;
        if let Some(p) = self.position() { write!( f, ", pos: {}", p)?; }
        if let Some(spd) = self.velocity { write!( f, ", spd: {:.1}", spd)?; }
        if let Some(trk) = self.true_track { write!( f, ", trk: {:.0}", trk)?; }
        if let Some(vr) = self.vertical_rate { write!( f, ", vr: {:.1}", vr)?; }
        if self.on_ground { write!( f, ", on_ground")?; }
        if let Some(sq) = &self.squawk { write!( f, ", squawk: {}", sq)?; }
        if let Some(t) = self.time_position { write!( f, ", time: {}", t)?; }
        write!( f, ")")
    }
}

/// the abstraction for where we get aircraft states from. Implementations are responsible
/// for enforcing timeouts, which are reported as errors
pub trait AircraftPositionProvider {
    fn find_in_box (&self, bbox: &GeoRect)->Result<Vec<AircraftState>>;
}
