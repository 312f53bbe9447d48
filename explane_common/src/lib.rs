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

//! domain neutral support for the explane crates: spherical geodesy, bounded ring buffers,
//! date/time formatting, blocking http helpers and process control

pub mod macros;
pub mod collections;
pub mod datetime;
pub mod geo;
pub mod net;
pub mod process;

/// round to given number of decimal places, ties go to the even neighbor
#[inline]
pub fn round_to (x: f64, decimals: i32)->f64 {
    let f = 10f64.powi(decimals);
    (x * f).round_ties_even() / f
}

/// arithmetic mean of a (possibly empty) sequence of values, NaN if there are none
pub fn mean<'a,I> (values: I)->f64 where I: IntoIterator<Item=&'a f64> {
    let (n,sum) = values.into_iter().fold( (0usize,0.0), |(n,sum),v| (n+1, sum+v));
    if n > 0 { sum / n as f64 } else { f64::NAN }
}

/// max of a sequence of values, None if there are none or all of them are NaN
pub fn max_value<'a,I> (values: I)->Option<f64> where I: IntoIterator<Item=&'a f64> {
    values.into_iter().copied().filter(|v| !v.is_nan()).fold( None, |acc,v| {
        match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v)
        }
    })
}
