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

use std::time::Duration;
use chrono::{DateTime, Local, TimeZone, Utc};

// as of Rust 1.87 the min,hour,day Duration ctors are experimental.
// for simple use cases we therefore provide our own wrappers
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn secs_f64 (n: f64)->Duration { Duration::from_secs_f64(n) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

#[inline]
pub fn local_now()->DateTime<Local> {
    Local::now()
}

/// the (non-negative) duration between two dates, zero if `dt_later` is before `dt_earlier`
pub fn duration_since<Tz: TimeZone> (dt_later: &DateTime<Tz>, dt_earlier: &DateTime<Tz>)->Duration {
    (dt_later.clone() - dt_earlier.clone()).to_std().unwrap_or( Duration::ZERO)
}

/// `YYYYMMDD` date format
pub fn compact_date<Tz> (dt: &DateTime<Tz>)->String where Tz: TimeZone, Tz::Offset: std::fmt::Display {
    dt.format("%Y%m%d").to_string()
}

/// locale independent `HH:MM:SS` time-of-day format
pub fn time_of_day<Tz> (dt: &DateTime<Tz>)->String where Tz: TimeZone, Tz::Offset: std::fmt::Display {
    dt.format("%H:%M:%S").to_string()
}

/// `YYYY-MM-DD HH:MM:SS` format we use for human readable status output
pub fn status_datetime<Tz> (dt: &DateTime<Tz>)->String where Tz: TimeZone, Tz::Offset: std::fmt::Display {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[inline]
pub fn epoch_secs<Tz: TimeZone> (dt: &DateTime<Tz>)->i64 {
    dt.timestamp()
}
