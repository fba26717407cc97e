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

use snafu::prelude::*;
use snafu::Location;

/// Every variant here is fatal: the decode path never retries, and callers
/// must treat the originating iterator as poisoned once one of these
/// escapes (see [`crate::iterator::RowIterator`]).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DecodeError {
    #[snafu(display("unknown column type tag {tag}"))]
    UnknownColumnType {
        tag: i32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("unknown compression type tag {tag}"))]
    UnknownCompressionType {
        tag: i32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("compression {compression:?} is not applicable to column type {column_type:?}"))]
    IncompatibleEncoding {
        column_type: crate::column_type::ColumnType,
        compression: crate::compression::CompressionType,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("truncated value: needed {needed} bytes but only {remaining} remained"))]
    TruncatedValue {
        needed: usize,
        remaining: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("RLE run extends {overrun} bytes past end of buffer"))]
    RunPastEnd {
        overrun: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("dictionary code {code} out of range for dictionary of size {size}"))]
    DictionaryIndexOutOfRange {
        code: u16,
        size: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("null index {index} is out of range for logical row count {count}"))]
    NullIndexOutOfRange {
        index: u32,
        count: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "null index {index} is not strictly greater than the previous index {previous}"
    ))]
    NullIndexOutOfOrder {
        index: u32,
        previous: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("next() called past exhaustion"))]
    ExhaustedMisuse {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("iterator used after a fatal decode error"))]
    PoisonedMisuse {
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
