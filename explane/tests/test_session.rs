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

/// tests that drive a measuring session with scripted devices, providers and sinks
/// run with "cargo test --test test_session -- --nocapture"

use std::{cell::{Cell, RefCell}, collections::VecDeque, sync::atomic::{AtomicBool, Ordering}, time::Duration};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use explane_common::{datetime::millis, geo::GeoRect};
use explane::{
    aircraft::{AircraftPositionProvider, AircraftState, PositionSource},
    devices::SoundLevelDevice,
    errors::{ExplaneError, Result},
    registration::{EventRecord, RecordMetadata, RegistrationSink},
    session::{MeasuringSession, SessionContext, TickOutcome, run_sessions, status_line},
    settings::Settings,
};

struct ScriptedDevice {
    values: VecDeque<f64>,
}

impl ScriptedDevice {
    fn new (values: &[f64])->Self { ScriptedDevice { values: values.iter().copied().collect() } }
}

impl SoundLevelDevice for ScriptedDevice {
    fn read_level (&mut self)->Result<f64> {
        self.values.pop_front().ok_or_else( || ExplaneError::DeviceError("end of script".to_string()))
    }
    fn model (&self)->&str { "scripted" }
}

struct FixedProvider {
    aircraft: Vec<AircraftState>,
    fail: bool,
    n_calls: Cell<usize>,
}

impl FixedProvider {
    fn new (aircraft: Vec<AircraftState>)->Self { FixedProvider { aircraft, fail: false, n_calls: Cell::new(0) } }
    fn failing ()->Self { FixedProvider { aircraft: Vec::new(), fail: true, n_calls: Cell::new(0) } }
}

impl AircraftPositionProvider for FixedProvider {
    fn find_in_box (&self, bbox: &GeoRect)->Result<Vec<AircraftState>> {
        println!("lookup in {bbox}");
        self.n_calls.set( self.n_calls.get() + 1);
        if self.fail {
            Err( ExplaneError::ExternalServiceError("service unavailable".to_string()))
        } else {
            Ok( self.aircraft.clone())
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    records: RefCell<Vec<EventRecord>>,
    fail: bool,
}

impl RegistrationSink for RecordingSink {
    fn submit (&self, record: &EventRecord)->Result<()> {
        self.records.borrow_mut().push( record.clone());
        if self.fail { Err( ExplaneError::ExternalServiceError("registration rejected".to_string())) } else { Ok(()) }
    }
}

fn aircraft (icao24: &str, lat: f64, lon: f64, alt: Option<f64>)->AircraftState {
    AircraftState {
        icao24: icao24.to_string(),
        callsign: Some("TRA6001 ".to_string()),
        origin_country: "Netherlands".to_string(),
        time_position: Some(1714564800),
        last_contact: 1714564800,
        latitude: Some(lat),
        longitude: Some(lon),
        baro_altitude: alt,
        geo_altitude: alt,
        on_ground: false,
        velocity: Some(75.0),
        true_track: Some(180.0),
        vertical_rate: Some(-5.0),
        squawk: None,
        spi: false,
        position_source: PositionSource::AdsB,
    }
}

fn context ()->SessionContext {
    let settings = Settings { sample_size: 3, sound_level_meter: "scripted".to_string(), ..Settings::default() };
    SessionContext::new( &settings, RecordMetadata::new( "scripted", "00:11:22:33:44:55")).unwrap()
}

fn t0 ()->DateTime<Utc> { Utc.with_ymd_and_hms( 2024, 5, 1, 12, 0, 0).unwrap() }
fn at (s: i64)->DateTime<Utc> { t0() + TimeDelta::seconds(s) }

#[test]
fn test_register_closest_aircraft () {
    let ctx = context();
    let mut device = ScriptedDevice::new( &[60.04, 61.0, 62.0, 70.0, 70.0, 70.0]);
    let provider = FixedProvider::new( vec![
        aircraft( "484a01", 52.36, 4.75, Some(900.0)),
        aircraft( "484a02", 52.33, 4.73, Some(600.0)),
        aircraft( "484a03", 52.326, 4.723, None),
    ]);
    let sink = RecordingSink::default();
    let mut session = MeasuringSession::new( &ctx, &mut device, &provider, &sink, t0());

    assert_eq!( TickOutcome::Accumulating(1), session.tick( at(21)).unwrap());
    assert_eq!( TickOutcome::Accumulating(2), session.tick( at(22)).unwrap());
    let outcome = session.tick( at(23)).unwrap();
    println!("outcome: {outcome}");
    match &outcome {
        TickOutcome::Registered{icao24, distance_meters} => {
            assert_eq!( "484a02", icao24);
            assert!( *distance_meters > 600.0 && *distance_meters < 1000.0);
        }
        other => panic!("expected registration, got {other}")
    }
    assert_eq!( vec![62.0, 61.0, 60.0], session.window().values());

    // same aircraft again after cooldown
    assert_eq!( TickOutcome::Accumulating(1), session.tick( at(44)).unwrap());
    assert_eq!( TickOutcome::Accumulating(2), session.tick( at(45)).unwrap());
    assert_eq!( TickOutcome::Duplicate{ icao24: "484a02".to_string() }, session.tick( at(46)).unwrap());
    drop(session);

    assert_eq!( 2, provider.n_calls.get());
    let records = sink.records.borrow();
    assert_eq!( 1, records.len());

    let record = &records[0];
    assert_eq!( "484a02", record.plane_icao24);
    assert_eq!( "TRA6001", record.plane_callsign);
    assert_eq!( vec![62.0, 61.0, 60.0], record.decibels_array);
    assert_eq!( 62.0, record.max_decibels);
    assert_eq!( 3000, record.sample_duration_in_ms);
    assert_eq!( 52.33, record.my_lat);
    assert_eq!( 4.72, record.my_lng);
    assert_eq!( "00:11:22:33:44:55", record.device_serial);
}

#[test]
fn test_cooldown_after_session_start () {
    let ctx = context();
    let mut device = ScriptedDevice::new( &[90.0; 5]);
    let provider = FixedProvider::new( vec![ aircraft( "484a02", 52.33, 4.73, Some(600.0)) ]);
    let sink = RecordingSink::default();
    let mut session = MeasuringSession::new( &ctx, &mut device, &provider, &sink, t0());

    for s in 1..=5 {
        assert_eq!( TickOutcome::Idle, session.tick( at(s)).unwrap());
    }
    drop(session);
    assert_eq!( 0, provider.n_calls.get());
}

#[test]
fn test_lookup_failure () {
    let ctx = context();
    let mut device = ScriptedDevice::new( &[70.0, 70.0, 70.0, 70.0]);
    let provider = FixedProvider::failing();
    let sink = RecordingSink::default();
    let mut session = MeasuringSession::new( &ctx, &mut device, &provider, &sink, t0());

    session.tick( at(30)).unwrap();
    session.tick( at(31)).unwrap();
    assert_eq!( TickOutcome::LookupFailed, session.tick( at(32)).unwrap());
    assert_eq!( 0, session.cycle().detector.counter());

    // the episode is over, we keep sampling
    assert_eq!( TickOutcome::Idle, session.tick( at(33)).unwrap());
    drop(session);
    assert!( sink.records.borrow().is_empty());
}

#[test]
fn test_no_aircraft () {
    let ctx = context();
    let mut device = ScriptedDevice::new( &[70.0, 70.0, 70.0]);
    let provider = FixedProvider::new( vec![ aircraft( "484a03", 52.326, 4.723, None) ]);
    let sink = RecordingSink::default();
    let mut session = MeasuringSession::new( &ctx, &mut device, &provider, &sink, t0());

    session.tick( at(30)).unwrap();
    session.tick( at(31)).unwrap();
    assert_eq!( TickOutcome::NoAircraft, session.tick( at(32)).unwrap());
}

#[test]
fn test_submit_failure () {
    let ctx = context();
    let mut device = ScriptedDevice::new( &[70.0; 6]);
    let provider = FixedProvider::new( vec![ aircraft( "484a02", 52.33, 4.73, Some(600.0)) ]);
    let sink = RecordingSink { fail: true, ..RecordingSink::default() };
    let mut session = MeasuringSession::new( &ctx, &mut device, &provider, &sink, t0());

    session.tick( at(30)).unwrap();
    session.tick( at(31)).unwrap();
    assert_eq!( TickOutcome::SubmitFailed{ icao24: "484a02".to_string() }, session.tick( at(32)).unwrap());

    // failed submissions are not retried
    session.tick( at(60)).unwrap();
    session.tick( at(61)).unwrap();
    assert_eq!( TickOutcome::Duplicate{ icao24: "484a02".to_string() }, session.tick( at(62)).unwrap());
    drop(session);
    assert_eq!( 1, sink.records.borrow().len());
}

#[test]
fn test_device_errors_end_session () {
    let ctx = context();
    let mut device = ScriptedDevice::new( &[55.0, 0.0]);
    let provider = FixedProvider::new( Vec::new());
    let sink = RecordingSink::default();
    let mut session = MeasuringSession::new( &ctx, &mut device, &provider, &sink, t0());

    assert!( session.tick( at(1)).is_ok());
    match session.tick( at(2)) {
        Err(ExplaneError::DeviceError(msg)) => println!("zero reading: {msg}"),
        other => panic!("expected device error, got {other:?}")
    }
    assert!( matches!( session.tick( at(3)), Err(ExplaneError::DeviceError(_))));
}

#[test]
fn test_run_sessions_stops () {
    let ctx = context();
    let mut device = ScriptedDevice::new( &[]);
    let provider = FixedProvider::new( Vec::new());
    let sink = RecordingSink::default();
    let keep_running = AtomicBool::new( false);

    assert!( run_sessions( &ctx, &mut device, &provider, &sink, &keep_running).is_ok());
}

#[test]
fn test_status_line () {
    let now = Local.with_ymd_and_hms( 2024, 5, 1, 14, 30, 5).unwrap();
    assert_eq!( "2024-05-01 14:30:05: 52.3 (#2) Average: 41.5", status_line( &now, 52.3, 2, 41.5));
}

/// a device that clears the keep-running flag after its last scripted reading, or reports
/// a fatal error once the script is exhausted
struct UnattendedDevice<'a> {
    values: VecDeque<f64>,
    keep_running: &'a AtomicBool,
    stop_when_done: bool,
    n_reads: usize,
}

impl<'a> UnattendedDevice<'a> {
    fn new (values: &[f64], keep_running: &'a AtomicBool, stop_when_done: bool)->Self {
        UnattendedDevice { values: values.iter().copied().collect(), keep_running, stop_when_done, n_reads: 0 }
    }
}

impl<'a> SoundLevelDevice for UnattendedDevice<'a> {
    fn read_level (&mut self)->Result<f64> {
        self.n_reads += 1;
        match self.values.pop_front() {
            Some(v) => {
                if self.values.is_empty() && self.stop_when_done { self.keep_running.store( false, Ordering::Relaxed); }
                Ok(v)
            }
            None => Err( ExplaneError::FatalDeviceError("device unplugged".to_string()))
        }
    }
    fn model (&self)->&str { "unattended" }
}

fn fast_context ()->SessionContext {
    let settings = Settings {
        sample_size: 3,
        sample_interval: millis(1),
        cooldown: Duration::ZERO,
        ..Settings::default()
    };
    SessionContext::new( &settings, RecordMetadata::new( "unattended", "00:11:22:33:44:55")).unwrap()
}

#[test]
fn test_device_error_restarts_session () {
    let ctx = fast_context();
    let keep_running = AtomicBool::new( true);
    // without a fresh detector the first loud reading after the failed one would trigger
    let mut device = UnattendedDevice::new( &[70.0, 70.0, 0.0, 70.0, 70.0], &keep_running, true);
    let provider = FixedProvider::new( vec![ aircraft( "484a02", 52.33, 4.73, Some(600.0)) ]);
    let sink = RecordingSink::default();

    assert!( run_sessions( &ctx, &mut device, &provider, &sink, &keep_running).is_ok());
    assert_eq!( 5, device.n_reads);
    assert_eq!( 0, provider.n_calls.get());
    assert!( sink.records.borrow().is_empty());
}

#[test]
fn test_restarted_session_registers () {
    let ctx = fast_context();
    let keep_running = AtomicBool::new( true);
    let mut device = UnattendedDevice::new( &[70.0, 0.0, 71.0, 72.0, 73.0], &keep_running, true);
    let provider = FixedProvider::new( vec![ aircraft( "484a02", 52.33, 4.73, Some(600.0)) ]);
    let sink = RecordingSink::default();

    assert!( run_sessions( &ctx, &mut device, &provider, &sink, &keep_running).is_ok());
    assert_eq!( 1, provider.n_calls.get());

    let records = sink.records.borrow();
    assert_eq!( 1, records.len());
    // the reading before the failure is not part of the new window
    assert_eq!( vec![73.0, 72.0, 71.0], records[0].decibels_array);
}

#[test]
fn test_fatal_device_error_ends_supervisor () {
    let ctx = fast_context();
    let keep_running = AtomicBool::new( true);
    let mut device = UnattendedDevice::new( &[70.0, 0.0, 70.0], &keep_running, false);
    let provider = FixedProvider::new( Vec::new());
    let sink = RecordingSink::default();

    match run_sessions( &ctx, &mut device, &provider, &sink, &keep_running) {
        Err(ExplaneError::FatalDeviceError(msg)) => println!("terminated with: {msg}"),
        other => panic!("expected fatal device error, got {other:?}")
    }
    assert_eq!( 4, device.n_reads);
    assert!( keep_running.load( Ordering::Relaxed));
}
