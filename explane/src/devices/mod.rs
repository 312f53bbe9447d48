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

//! sound level meter devices

use tracing::info;
use explane_common::round_to;

use crate::{
    errors::{Result, device_error, fatal_device_error},
    settings::Settings,
};

pub mod gm1356;
pub mod mock_meter;

pub use gm1356::Gm1356;
pub use mock_meter::MockMeter;

/// a connected and configured sound level meter
pub trait SoundLevelDevice {
    /// blocking read of the current sound pressure level in dB. Returns a device error if the
    /// read failed or did not produce a measurement
    fn read_level (&mut self)->Result<f64>;

    fn model (&self)->&str;
}

impl<T: SoundLevelDevice + ?Sized> SoundLevelDevice for Box<T> {
    fn read_level (&mut self)->Result<f64> { (**self).read_level() }
    fn model (&self)->&str { (**self).model() }
}

/// connect and configure the device named by `settings.sound_level_meter`. All errors
/// returned from here are fatal
pub fn init_device (settings: &Settings)->Result<Box<dyn SoundLevelDevice>> {
    let device: Box<dyn SoundLevelDevice> = match settings.sound_level_meter.as_str() {
        gm1356::MODEL => Box::new( Gm1356::connect( &settings.device_path)?),
        mock_meter::MODEL => {
            let (min,max) = settings.mock_range;
            Box::new( MockMeter::new( min, max))
        }
        other => return Err( fatal_device_error!("unsupported sound level meter: {}", other))
    };

    info!("using sound level meter {}", device.model());
    Ok(device)
}

/// read from `device` and turn the raw value into a sample: rejects missing (zero, negative or
/// non finite) readings and rounds to one decimal
pub fn read_sample (device: &mut dyn SoundLevelDevice)->Result<f64> {
    checked_level( device.read_level()?)
}

pub fn checked_level (raw: f64)->Result<f64> {
    if raw.is_finite() && raw > 0.0 {
        Ok( round_to( raw, 1))
    } else {
        Err( device_error!("did not receive measurement from sensor (got {})", raw))
    }
}
