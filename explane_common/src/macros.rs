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

/// shorthand for thiserror based error enums with String or `#[from]` payloads:
/// ```ignore
/// define_error!{ pub GeoError =
///     InvalidCoordinate(String) : "invalid coordinate: {0}",
///     IOError( #[from] std::io::Error ) : "IO error: {0}"
/// }
/// ```
/// derives `thiserror::Error` and `Debug` and uses each literal as `#[error(..)]` message
#[macro_export]
macro_rules! define_error {
    ($vis:vis $name:ident = $( $variant:ident ( $( $( #[$attr:meta] )? $payload:ty),* ) : $msg:literal ),*) => {
        #[derive(thiserror::Error,Debug)]
        $vis enum $name {
            $(
                #[error($msg)]
                $variant ( $( $(#[$attr])? $payload ),* )
            ),*
        }
    }
}

/// turn a foreign error into the String variant of one of our error enums, keeping only its message
/// ```ignore
/// map_to_opaque_error!( GeoError => ExplaneError::InputError);
/// ```
#[macro_export]
macro_rules! map_to_opaque_error {
    ($src:ty => $target:ident :: $variant:ident) => {
        impl From<$src> for $target {
            fn from (e: $src)->Self { $target::$variant( e.to_string()) }
        }
    };
}
