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

use std::collections::VecDeque;

/// a VecDeque that is used as a ringbuffer, i.e. with a fixed maximum number of elements.
/// Note that the bound is the *requested* capacity, not `VecDeque::capacity()` (which can be larger)
pub trait RingDeque<T> {
    /// create a ringbuffer that is completely filled with clones of `fill`
    fn filled_ringbuffer (max_len: usize, fill: T)->Self where T: Clone;

    /// push `t` at the front, dropping the back element if we are at `max_len`. Returns the dropped element
    fn push_front_bounded (&mut self, max_len: usize, t: T)->Option<T>;
}

impl<T> RingDeque<T> for VecDeque<T> {
    fn filled_ringbuffer (max_len: usize, fill: T)->Self where T: Clone {
        let mut v = VecDeque::with_capacity(max_len);
        v.resize( max_len, fill);
        v
    }

    #[inline]
    fn push_front_bounded (&mut self, max_len: usize, t: T)->Option<T> {
        if max_len == 0 { return Some(t) }
        let dropped = if self.len() >= max_len { self.pop_back() } else { None };
        self.push_front(t);
        dropped
    }
}
