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

use std::{fmt, time::Duration};
use chrono::{DateTime, Utc};
use explane_common::datetime::duration_since;

use crate::matcher::DedupTracker;

/// the result of feeding one sample into the [`DetectionStateMachine`]
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum DetectionState {
    /// below threshold or in cooldown
    Idle,
    /// number of consecutive loud samples so far
    Accumulating(usize),
    /// transient - we just reached the required number of consecutive loud samples
    Triggered,
}

impl fmt::Display for DetectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionState::Idle => write!(f, "Idle"),
            DetectionState::Accumulating(n) => write!(f, "Accumulating({n})"),
            DetectionState::Triggered => write!(f, "Triggered"),
        }
    }
}

/// threshold / debounce / cooldown logic that decides if a sound level sample completes a
/// loud noise event for which we should look up aircraft.
///
/// Only *consecutive* samples at or above threshold count. Each sample below threshold, and
/// each sample within `cooldown` of the last trigger, resets the counter
#[derive(Debug,Clone)]
pub struct DetectionStateMachine {
    threshold: f64,
    sample_size: usize,
    cooldown: Duration,

    counter: usize,
    last_trigger: DateTime<Utc>,
}

impl DetectionStateMachine {
    /// note that `start` counts as a trigger time, i.e. there is no lookup within `cooldown` of it
    pub fn new (threshold: f64, sample_size: usize, cooldown: Duration, start: DateTime<Utc>)->Self {
        DetectionStateMachine { threshold, sample_size: sample_size.max(1), cooldown, counter: 0, last_trigger: start }
    }

    pub fn update (&mut self, value: f64, now: DateTime<Utc>)->DetectionState {
        if value < self.threshold || self.is_cooling_down( now) {
            self.counter = 0;
            return DetectionState::Idle
        }

        self.counter += 1;
        if self.counter < self.sample_size {
            DetectionState::Accumulating( self.counter)
        } else {
            self.counter = 0;
            self.last_trigger = now;
            DetectionState::Triggered
        }
    }

    pub fn is_cooling_down (&self, now: DateTime<Utc>)->bool {
        duration_since( &now, &self.last_trigger) < self.cooldown
    }

    pub fn counter (&self)->usize { self.counter }
    pub fn last_trigger (&self)->DateTime<Utc> { self.last_trigger }
    pub fn threshold (&self)->f64 { self.threshold }
    pub fn sample_size (&self)->usize { self.sample_size }
}

/// the mutable detection state the measuring loop carries across ticks
#[derive(Debug,Clone)]
pub struct DetectionCycle {
    pub detector: DetectionStateMachine,
    pub dedup: DedupTracker,
}

impl DetectionCycle {
    pub fn new (threshold: f64, sample_size: usize, cooldown: Duration, start: DateTime<Utc>)->Self {
        DetectionCycle {
            detector: DetectionStateMachine::new( threshold, sample_size, cooldown, start),
            dedup: DedupTracker::new(),
        }
    }
}
