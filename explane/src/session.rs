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

//! the measuring loop. A [`MeasuringSession`] owns the sample window and detection state and
//! is advanced one sample at a time by [`MeasuringSession::tick`]. [`run_sessions`] is the
//! outer loop that starts a fresh session whenever the current one fails

use std::{fmt, sync::atomic::{AtomicBool, Ordering}, thread, time::Duration};
use chrono::{DateTime, Local, Utc};
use tracing::{debug, error, info, warn};
use explane_common::{
    datetime::{status_datetime, utc_now},
    geo::{GeoPoint3, GeoRect},
};

use crate::{
    aircraft::AircraftPositionProvider,
    detection::{DetectionCycle, DetectionState},
    devices::{SoundLevelDevice, read_sample},
    errors::Result,
    matcher::closest,
    registration::{EventRecordBuilder, RecordMetadata, RegistrationSink},
    sampler::SampleWindow,
    settings::Settings,
};

/// what happened during one tick
#[derive(Debug,Clone,PartialEq)]
pub enum TickOutcome {
    Idle,
    Accumulating(usize),
    /// triggered but there was no aircraft with a complete position in the search box
    NoAircraft,
    /// triggered but the aircraft lookup failed
    LookupFailed,
    /// closest aircraft is the one we registered last
    Duplicate { icao24: String },
    Registered { icao24: String, distance_meters: f64 },
    /// the record was built but could not be submitted
    SubmitFailed { icao24: String },
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickOutcome::Idle => write!(f, "idle"),
            TickOutcome::Accumulating(n) => write!(f, "accumulating({n})"),
            TickOutcome::NoAircraft => write!(f, "no aircraft"),
            TickOutcome::LookupFailed => write!(f, "lookup failed"),
            TickOutcome::Duplicate{icao24} => write!(f, "duplicate {icao24}"),
            TickOutcome::Registered{icao24,distance_meters} => write!(f, "registered {icao24} at {distance_meters}m"),
            TickOutcome::SubmitFailed{icao24} => write!(f, "submit failed for {icao24}"),
        }
    }
}

/// the per-process constants every session is created from
#[derive(Debug,Clone)]
pub struct SessionContext {
    pub observer: GeoPoint3,
    pub bbox: GeoRect,
    pub builder: EventRecordBuilder,

    pub sample_size: usize,
    pub threshold: f64,
    pub baseline: f64,
    pub sample_interval: Duration,
    pub cooldown: Duration,
}

impl SessionContext {
    pub fn new (settings: &Settings, metadata: RecordMetadata)->Result<Self> {
        let observer = settings.observer_location();
        let bbox = GeoRect::around( &observer.surface_point(), settings.search_radius())?;
        info!("searching for aircraft within {}", bbox);

        Ok( SessionContext {
            observer,
            bbox,
            builder: EventRecordBuilder::new( metadata),
            sample_size: settings.sample_size,
            threshold: settings.threshold_decibel,
            baseline: settings.whisper_decibel,
            sample_interval: settings.sample_interval,
            cooldown: settings.cooldown,
        })
    }
}

pub fn status_line (now: &DateTime<Local>, value: f64, counter: usize, average: f64)->String {
    format!("{}: {} (#{}) Average: {}", status_datetime( now), value, counter, average)
}

pub struct MeasuringSession<'a> {
    ctx: &'a SessionContext,
    window: SampleWindow,
    cycle: DetectionCycle,

    device: &'a mut dyn SoundLevelDevice,
    provider: &'a dyn AircraftPositionProvider,
    sink: &'a dyn RegistrationSink,
}

impl<'a> MeasuringSession<'a> {
    pub fn new (ctx: &'a SessionContext,
                device: &'a mut dyn SoundLevelDevice,
                provider: &'a dyn AircraftPositionProvider,
                sink: &'a dyn RegistrationSink,
                start: DateTime<Utc>)->Self
    {
        let window = SampleWindow::new( ctx.sample_size, ctx.sample_interval, ctx.baseline);
        let cycle = DetectionCycle::new( ctx.threshold, ctx.sample_size, ctx.cooldown, start);

        MeasuringSession { ctx, window, cycle, device, provider, sink }
    }

    pub fn window (&self)->&SampleWindow { &self.window }
    pub fn cycle (&self)->&DetectionCycle { &self.cycle }

    /// read one sample and process it. Device errors are returned (they end the session),
    /// aircraft lookup and submission errors are logged and reported as outcome
    pub fn tick (&mut self, now: DateTime<Utc>)->Result<TickOutcome> {
        let value = read_sample( &mut *self.device)?;
        self.window.push_sample( value);

        let local_now = now.with_timezone( &Local);
        info!("{}", status_line( &local_now, value, self.cycle.detector.counter(), self.window.average()));

        match self.cycle.detector.update( value, now) {
            DetectionState::Idle => Ok( TickOutcome::Idle ),
            DetectionState::Accumulating(n) => Ok( TickOutcome::Accumulating(n) ),
            DetectionState::Triggered => Ok( self.register_closest_aircraft( local_now) )
        }
    }

    fn register_closest_aircraft (&mut self, now: DateTime<Local>)->TickOutcome {
        info!("getting aircraft information from provider..");
        let candidates = match self.provider.find_in_box( &self.ctx.bbox) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("aircraft lookup failed: {}", e);
                return TickOutcome::LookupFailed
            }
        };
        debug!("got {} candidates", candidates.len());

        let Some(found) = closest( &self.ctx.observer, &candidates) else {
            info!("no aircraft found in the vicinity");
            return TickOutcome::NoAircraft
        };
        let icao24 = found.aircraft.icao24.clone();

        if !self.cycle.dedup.should_accept( found.aircraft) {
            info!("found same aircraft {} as in last registration, ignoring measurement", icao24);
            return TickOutcome::Duplicate { icao24 }
        }

        info!("closest aircraft found at {} meters distance: {}", found.distance_meters, found.aircraft);
        let record = self.ctx.builder.build_at( now, &self.ctx.observer, &self.window, found.aircraft, found.distance_meters);

        let outcome = match self.sink.submit( &record) {
            Ok(()) => TickOutcome::Registered { icao24, distance_meters: found.distance_meters },
            Err(e) => {
                error!("{}", e);
                TickOutcome::SubmitFailed { icao24 }
            }
        };

        self.cycle.dedup.accept( found.aircraft.clone());
        outcome
    }
}

/// run one session until `keep_running` is cleared or a device error occurs
pub fn run_session (ctx: &SessionContext,
                    device: &mut dyn SoundLevelDevice,
                    provider: &dyn AircraftPositionProvider,
                    sink: &dyn RegistrationSink,
                    keep_running: &AtomicBool)->Result<()>
{
    let mut session = MeasuringSession::new( ctx, device, provider, sink, utc_now());

    while keep_running.load( Ordering::Relaxed) {
        thread::sleep( ctx.sample_interval);
        let outcome = session.tick( utc_now())?;
        debug!("tick: {}", outcome);
    }
    Ok(())
}

/// the supervisor loop: each failing session is logged and replaced by a fresh one. Only
/// fatal errors are returned
pub fn run_sessions (ctx: &SessionContext,
                     device: &mut dyn SoundLevelDevice,
                     provider: &dyn AircraftPositionProvider,
                     sink: &dyn RegistrationSink,
                     keep_running: &AtomicBool)->Result<()>
{
    while keep_running.load( Ordering::Relaxed) {
        if let Err(e) = run_session( ctx, &mut *device, provider, sink, keep_running) {
            if e.is_fatal() { return Err(e) }
            error!("exception during measurement: {}", e);
        }
    }

    info!("measuring terminated");
    Ok(())
}
