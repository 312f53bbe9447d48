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

/// tests for parsing OpenSky /states/all responses
/// run with "cargo test --test test_opensky -- --nocapture"

use explane::{aircraft::PositionSource, opensky::parse_states};

const STATES_JSON: &str = r#"{
  "time": 1714564800,
  "states": [
    ["484a01", "KLM1234 ", "Kingdom of the Netherlands", 1714564799, 1714564800, 4.7412, 52.3412, 975.36, false, 88.5, 234.1, -4.23, null, 1005.84, "1000", false, 0],
    ["3c6444", "DLH9LA  ", "Germany", 1714564798, 1714564800, 4.6921, 52.3011, null, true, 0.0, 90.0, null, null, null, null, false, 2, 4],
    [null, "BROKEN  ", "Nowhere", null, 1714564800, null, null, null, false, null, null, null, null, null, null, false, 0],
    ["4ca7b5", "RYR4GB  ", "Ireland", null, 1714564790, null, null, null, false, null, null, null, null, null, null, false, 7]
  ]
}"#;

#[test]
fn test_parse_states () {
    let states = parse_states( STATES_JSON).unwrap();
    for s in &states { println!("{s}"); }

    // entries without icao24 or with unknown position source are skipped
    assert_eq!( 2, states.len());

    let klm = &states[0];
    assert_eq!( "484a01", klm.icao24);
    assert_eq!( "KLM1234", klm.trimmed_callsign());
    assert_eq!( Some(1714564799), klm.time_position);
    assert_eq!( 1714564800, klm.last_contact);
    assert_eq!( Some(52.3412), klm.latitude);
    assert_eq!( Some(4.7412), klm.longitude);
    assert_eq!( Some(975.36), klm.baro_altitude);
    assert_eq!( Some(1005.84), klm.geo_altitude);
    assert_eq!( Some(-4.23), klm.vertical_rate);
    assert_eq!( Some("1000".to_string()), klm.squawk);
    assert_eq!( PositionSource::AdsB, klm.position_source);
    assert!( klm.position().is_some());

    let dlh = &states[1];
    assert!( dlh.on_ground);
    assert_eq!( None, dlh.geo_altitude);
    assert_eq!( PositionSource::Mlat, dlh.position_source);
    assert!( dlh.position().is_none());
}

#[test]
fn test_no_states () {
    let states = parse_states( r#"{"time": 1714564800, "states": null}"#).unwrap();
    assert!( states.is_empty());
}

#[test]
fn test_malformed_response () {
    assert!( parse_states( r#"{"states": []}"#).is_err());
    assert!( parse_states( "<html>service unavailable</html>").is_err());
}
