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

use rand::Rng;

use crate::errors::Result;
use super::SoundLevelDevice;

pub const MODEL: &str = "mock_meter";

/// fake meter producing uniformly distributed integer readings, for development without hardware
#[derive(Debug,Clone)]
pub struct MockMeter {
    min_value: u32,
    max_value: u32,
}

impl MockMeter {
    pub fn new (min_value: u32, max_value: u32)->Self {
        MockMeter { min_value: min_value.min(max_value), max_value: max_value.max(min_value) }
    }
}

impl SoundLevelDevice for MockMeter {
    fn read_level (&mut self)->Result<f64> {
        Ok( rand::rng().random_range( self.min_value..=self.max_value) as f64 )
    }

    fn model (&self)->&str { MODEL }
}
