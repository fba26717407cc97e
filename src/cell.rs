// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bytes::Bytes;

/// A reusable, mutable container holding one decoded value.
///
/// Its identity does not change across rows: decoders keep one `Cell` and
/// overwrite its contents on every call to `extract_into`/`next`. Callers
/// that need to retain a value past the next `next()` call must clone it;
/// `Bytes` clones are cheap (refcounted slices of the original buffer) but
/// a later call on the same decoder can still replace what this `Cell`
/// points at.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Void,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Packed per the writer's convention: seconds since epoch and
    /// nanoseconds within the second, see [`crate::column_type::pack_timestamp`].
    Timestamp { seconds: i64, nanos: u32 },
    String(Bytes),
    Binary(Bytes),
    /// Opaque blob handed verbatim to a [`crate::column_type::GenericDeserializer`].
    Generic(Bytes),
}

impl Cell {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Byte(v) => Some(*v as i64),
            Cell::Short(v) => Some(*v as i64),
            Cell::Int(v) => Some(*v as i64),
            Cell::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Cell::String(b) | Cell::Binary(b) | Cell::Generic(b) => Some(b),
            _ => None,
        }
    }

    /// Materializes a TIMESTAMP cell as a calendar-aware UTC instant.
    /// Returns `None` for every other variant and for a `nanos` value that
    /// doesn't fit a valid sub-second offset.
    pub fn as_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        match self {
            Cell::Timestamp { seconds, nanos } => {
                chrono::DateTime::from_timestamp(*seconds, *nanos)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_cell_converts_to_utc_datetime() {
        let cell = Cell::Timestamp {
            seconds: 1_700_000_000,
            nanos: 500_000_000,
        };
        let dt = cell.as_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(dt.timestamp_subsec_nanos(), 500_000_000);
    }

    #[test]
    fn non_timestamp_cell_has_no_datetime() {
        assert!(Cell::Int(5).as_datetime().is_none());
    }
}
