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

use std::{collections::VecDeque, time::Duration};
use explane_common::{collections::RingDeque, mean, max_value};

/// the last N sound level readings, newest first. The window is always full - it starts out
/// with N copies of a quiet baseline level so that the rolling average does not trigger before
/// we have real data
#[derive(Debug,Clone)]
pub struct SampleWindow {
    capacity: usize,
    sample_interval: Duration, // the time each reading represents
    values: VecDeque<f64>,
    average: f64,
}

impl SampleWindow {
    pub fn new (capacity: usize, sample_interval: Duration, baseline: f64)->Self {
        let capacity = capacity.max(1);
        let values: VecDeque<f64> = RingDeque::filled_ringbuffer( capacity, baseline);
        SampleWindow { capacity, sample_interval, values, average: baseline }
    }

    /// drop the oldest reading and add `value` as the newest one
    pub fn push_sample (&mut self, value: f64) {
        self.values.push_front_bounded( self.capacity, value);
        self.average = mean( &self.values);
    }

    pub fn average (&self)->f64 { self.average }

    pub fn max (&self)->f64 { max_value( &self.values).unwrap_or( f64::NAN) }

    /// snapshot of the current readings, newest first
    pub fn values (&self)->Vec<f64> { self.values.iter().copied().collect() }

    pub fn newest (&self)->Option<f64> { self.values.front().copied() }

    pub fn len (&self)->usize { self.values.len() }

    pub fn capacity (&self)->usize { self.capacity }

    pub fn sample_interval (&self)->Duration { self.sample_interval }

    /// total time span covered by the window
    pub fn duration (&self)->Duration { self.sample_interval * self.values.len() as u32 }
}
