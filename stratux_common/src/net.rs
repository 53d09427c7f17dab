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
#![allow(unused)]

///! common utility functions for HTTP based device interfaces

use reqwest::{Client,IntoUrl,StatusCode};
use serde::{de::DeserializeOwned,Serialize};

use crate::define_error;

define_error!{ pub NetError =
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    StatusError(StatusCode) : "unexpected status: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// GET a JSON resource and deserialize it
pub async fn get_json<T,U> (client: &Client, url: U)->Result<T> where T: DeserializeOwned, U: IntoUrl {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status.is_success() {
        Ok( response.json::<T>().await? )
    } else {
        Err( NetError::StatusError(status) )
    }
}

/// POST a JSON body, ignoring the response content
pub async fn post_json<T,U> (client: &Client, url: U, body: &T)->Result<()> where T: Serialize + ?Sized, U: IntoUrl {
    let response = client.post(url).json(body).send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err( NetError::StatusError(status) )
    }
}

/// replace the host (and optional port) part of a `scheme://host[:port]/path` URL
pub fn with_host (url: &str, host: &str)->String {
    if let Some(idx) = url.find("://") {
        let rest = &url[idx+3..];
        let path = rest.find('/').map( |i| &rest[i..]).unwrap_or("");
        format!("{}://{}{}", &url[..idx], host, path)
    } else {
        url.to_string()
    }
}
