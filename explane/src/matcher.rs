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

use tracing::{debug, warn};
use uom::si::length::meter;
use explane_common::geo::GeoPoint3;

use crate::aircraft::AircraftState;

/// the aircraft closest to the observer and its (rounded) distance in meters
#[derive(Debug,Clone,Copy)]
pub struct ClosestAircraft<'a> {
    pub aircraft: &'a AircraftState,
    pub distance_meters: f64,
}

/// rounded distance in meters between observer and aircraft position, None if the aircraft
/// position is incomplete or invalid
pub fn distance_meters (observer: &GeoPoint3, aircraft: &AircraftState)->Option<f64> {
    let pos = aircraft.position()?;
    match observer.distance_to( &pos) {
        Ok(d) => Some( d.get::<meter>().round_ties_even()),
        Err(e) => { warn!("invalid position for aircraft {}: {}", aircraft.icao24, e); None }
    }
}

/// find the candidate closest to `observer`. Candidates without latitude, longitude or altitude
/// are skipped. Distances are compared after rounding to full meters, the first candidate
/// with the minimal distance wins
pub fn closest<'a> (observer: &GeoPoint3, candidates: &'a [AircraftState])->Option<ClosestAircraft<'a>> {
    let mut best: Option<ClosestAircraft<'a>> = None;
    let mut n_skipped = 0;

    for aircraft in candidates {
        if let Some(distance_meters) = distance_meters( observer, aircraft) {
            if best.map_or( true, |b| distance_meters < b.distance_meters) {
                best = Some( ClosestAircraft { aircraft, distance_meters } );
            }
        } else {
            debug!("missing location data for aircraft {}", aircraft.icao24);
            n_skipped += 1;
        }
    }

    if n_skipped > 0 { debug!("skipped {} of {} candidates", n_skipped, candidates.len()); }
    best
}

/// `false` if `candidate` is the same aircraft as the last accepted one
pub fn should_accept (candidate: &AircraftState, last_matched: Option<&AircraftState>)->bool {
    match last_matched {
        Some(last) => !candidate.is_same_aircraft( last),
        None => true
    }
}

/// single slot memory of the last accepted aircraft, used to suppress repeated registrations
/// of the same aircraft on consecutive triggers
#[derive(Debug,Clone,Default)]
pub struct DedupTracker {
    last_matched: Option<AircraftState>,
}

impl DedupTracker {
    pub fn new ()->Self { DedupTracker { last_matched: None } }

    pub fn should_accept (&self, candidate: &AircraftState)->bool {
        should_accept( candidate, self.last_matched.as_ref())
    }

    pub fn accept (&mut self, candidate: AircraftState) {
        self.last_matched = Some(candidate);
    }

    pub fn last_matched (&self)->Option<&AircraftState> { self.last_matched.as_ref() }
}
