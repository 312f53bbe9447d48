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

/// run with "cargo test --test test_settings -- --nocapture"

use std::{fs, path::PathBuf};
use explane_common::datetime::secs;
use explane::{
    errors::ExplaneError,
    settings::{OpenSkyCredentials, Settings, find_ethernet_interface, load_settings, parse_settings, read_mac_address, resolve_mac_address},
};

#[test]
fn test_partial_settings () {
    let settings = parse_settings( r#"Settings( sample_size: 5, threshold_decibel: 62.5, sound_level_meter: "mock_meter" )"#).unwrap();
    println!("{settings:#?}");

    assert_eq!( 5, settings.sample_size);
    assert_eq!( 62.5, settings.threshold_decibel);
    assert_eq!( "mock_meter", settings.sound_level_meter);

    let defaults = Settings::default();
    assert_eq!( defaults.cooldown, settings.cooldown);
    assert_eq!( secs(20), settings.cooldown);
    assert_eq!( 1.0, settings.altitude_meters);
    assert_eq!( None, settings.registration_url);
}

#[test]
fn test_invalid_settings () {
    match parse_settings( "Settings( sample_size: 0 )") {
        Err(ExplaneError::ConfigError(msg)) => println!("rejected: {msg}"),
        other => panic!("expected config error, got {other:?}")
    }
    assert!( parse_settings( "Settings( sample_size: \"ten\" )").is_err());
}

#[test]
fn test_example_config () {
    let path = PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("configs/explane.ron");
    let settings = load_settings( &path).unwrap();
    assert_eq!( Settings::default(), settings);
}

#[test]
fn test_missing_settings_file () {
    let settings = load_settings( "/this/does/not/exist/explane.ron").unwrap();
    assert_eq!( Settings::default(), settings);
}

#[test]
fn test_mac_address () {
    let net_dir = std::env::temp_dir().join( format!("explane-test-net-{}", std::process::id()));
    for interface in ["lo", "wlan0", "eth0", "enp3s0"] {
        fs::create_dir_all( net_dir.join( interface)).unwrap();
    }
    fs::write( net_dir.join("enp3s0/address"), "b8:27:eb:12:34:56\n").unwrap();

    let interface = find_ethernet_interface( &net_dir).unwrap();
    assert_eq!( "enp3s0", interface);
    assert_eq!( "b8:27:eb:12:34:56", read_mac_address( &net_dir, &interface).unwrap());
    assert!( read_mac_address( &net_dir, "eth0").is_err());

    fs::remove_dir_all( &net_dir).unwrap();
}

#[test]
fn test_configured_mac_address () {
    let settings = Settings { mac_address: Some("00:11:22:33:44:55".to_string()), ..Settings::default() };
    assert_eq!( "00:11:22:33:44:55", resolve_mac_address( &settings).unwrap());
}

#[test]
fn test_credentials_not_logged () {
    let settings = parse_settings( r#"Settings( opensky_credentials: Some( (user: "station42", password: "s3cr3t-pw") ) )"#).unwrap();
    assert_eq!( Some( OpenSkyCredentials { user: "station42".to_string(), password: "s3cr3t-pw".to_string() }), settings.opensky_credentials);

    let dbg = format!("{settings:?}");
    println!("{dbg}");
    assert!( dbg.contains("station42"));
    assert!( !dbg.contains("s3cr3t-pw"));
}
