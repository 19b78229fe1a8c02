// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the lighting bridge.
//!
//! [`LightSource`] is the interface the poll loop fetches lights through.
//! [`BridgeClient`] implements it over the bridge's HTTP API:
//!
//! - `GET /lights` returns a list of `{ "id": ... }` summaries
//! - `GET /lights/{id}` returns one full light record

mod http;

pub use http::{BridgeClient, BridgeConfig};

use crate::error::Result;
use crate::state::{Light, LightSummary};
use crate::types::LightId;

/// A source of light records.
#[allow(async_fn_in_trait)]
pub trait LightSource {
    /// Fetches the index of all lights.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails, or a decode error if
    /// the body is not a list of summaries.
    async fn list_lights(&self) -> Result<Vec<LightSummary>>;

    /// Fetches the full record of one light.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails, or a decode error if
    /// the body is not a light record.
    async fn get_light(&self, id: &LightId) -> Result<Light>;
}
