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

use thiserror::Error;
use explane_common::{geo::GeoError, net::NetError, map_to_opaque_error};

pub type Result<T> = std::result::Result<T,ExplaneError>;

#[derive(Error,Debug)]
pub enum ExplaneError {

    /// the sound level meter cannot be used at all (not found, not configurable)
    #[error("fatal device error {0}")]
    FatalDeviceError(String),

    /// a single read failed or did not produce a measurement
    #[error("device error {0}")]
    DeviceError(String),

    /// aircraft lookup, settings API or registration endpoint failed
    #[error("external service error {0}")]
    ExternalServiceError(String),

    #[error("input error {0}")]
    InputError(String),

    #[error("config error {0}")]
    ConfigError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("net error {0}")]
    NetError( #[from] NetError),
}

impl ExplaneError {
    pub fn is_fatal (&self)->bool {
        matches!( self, ExplaneError::FatalDeviceError(_))
    }
}

map_to_opaque_error!( GeoError => ExplaneError::InputError);

macro_rules! fatal_device_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::ExplaneError::FatalDeviceError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use fatal_device_error;

macro_rules! device_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::ExplaneError::DeviceError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use device_error;

macro_rules! service_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::ExplaneError::ExternalServiceError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use service_error;

macro_rules! input_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::ExplaneError::InputError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use input_error;

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::ExplaneError::ConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;
