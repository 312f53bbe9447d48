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

//! detection of aircraft noise events: sound level samples are checked for sustained loud
//! noise, which triggers a lookup of the closest aircraft around the station. Accepted
//! aircraft are registered as [`registration::EventRecord`]s

pub mod errors;

pub mod settings;
pub mod devices;
pub mod aircraft;
pub mod opensky;

pub mod sampler;
pub mod detection;
pub mod matcher;
pub mod registration;

pub mod session;

pub use errors::{ExplaneError, Result};
pub use settings::{Settings, load_settings};
pub use session::{MeasuringSession, SessionContext, TickOutcome, run_sessions};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_VERSION: &str = concat!("explane-pi ", env!("CARGO_PKG_VERSION"));
pub const DEVICE_PLATFORM: &str = "explane-pi";
