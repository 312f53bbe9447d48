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

//! common utility functions for (blocking) network operations

use std::time::Duration;
use reqwest::{blocking::{Client, RequestBuilder}, header::{HeaderValue, CONTENT_TYPE}, StatusCode};
use serde::de::DeserializeOwned;

use crate::define_error;

define_error!{ pub NetError =
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    NotFoundError(String) : "not found {0}",
    StatusError(String) : "response status {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// a blocking client with request timeout
pub fn new_client (timeout: Duration)->Result<Client> {
    Ok( Client::builder().timeout( timeout).build()? )
}

/// send request and deserialize JSON response body, mapping non-success status codes to errors
pub fn send_for_json<T> (req: RequestBuilder, url: &str)->Result<T> where T: DeserializeOwned {
    let response = req.send()?;

    match response.status() {
        StatusCode::OK => Ok( response.json()? ),
        StatusCode::NOT_FOUND => Err( NetError::NotFoundError( url.to_string())),
        other => Err( NetError::StatusError( format!("{other} for {url}")))
    }
}

/// GET `url` and deserialize JSON response body
pub fn get_json<T> (client: &Client, url: &str)->Result<T> where T: DeserializeOwned {
    send_for_json( client.get(url), url)
}

/// POST an already serialized JSON document. Any 2xx status counts as success
pub fn post_json_str (client: &Client, url: &str, json: String)->Result<StatusCode> {
    let response = client.post(url)
        .header( CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body( json)
        .send()?;

    let status = response.status();
    if status.is_success() {
        Ok(status)
    } else {
        Err( NetError::StatusError( format!("{status} for {url}")))
    }
}
