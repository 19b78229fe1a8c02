// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output sinks for change events.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::state::LightChange;

/// Consumes the changes produced by one successful poll.
pub trait ChangeSink {
    /// Receives the ordered changes of one poll. Called only after the
    /// poll fully succeeded, possibly with an empty slice.
    fn emit(&mut self, changes: &[LightChange]);
}

impl ChangeSink for Vec<LightChange> {
    fn emit(&mut self, changes: &[LightChange]) {
        self.extend_from_slice(changes);
    }
}

/// Writes one rendered item per change.
///
/// Added and field change events are written as JSON objects indented with
/// four spaces; removals as a sentence:
///
/// ```text
/// {
///     "id": "1",
///     "on": false
/// }
/// Light1 (1) has been removed
/// ```
#[derive(Debug)]
pub struct ConsoleSink<W> {
    writer: W,
}

impl ConsoleSink<io::Stdout> {
    /// Writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Writes to the given writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns a reference to the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_all(&mut self, changes: &[LightChange]) -> io::Result<()> {
        for change in changes {
            let line = render(change)?;
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()
    }
}

impl<W: Write> ChangeSink for ConsoleSink<W> {
    fn emit(&mut self, changes: &[LightChange]) {
        if let Err(e) = self.write_all(changes) {
            tracing::warn!(error = %e, "Failed to write changes");
        }
    }
}

/// Renders one change the way [`ConsoleSink`] prints it.
///
/// # Errors
///
/// Returns error if the change cannot be serialized.
pub fn render(change: &LightChange) -> io::Result<String> {
    if let LightChange::Removed { .. } = change {
        return Ok(change.to_string());
    }

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    change.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
