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

//! Iterator facade (spec.md §4.D): the engine-facing row cursor. Public
//! contract is `init` / `next` / `current`, with `init` deferred to the
//! first `next()` call.

use tracing::warn;

use crate::byte_order::Cursor;
use crate::cell::Cell;
use crate::column_type::ColumnType;
use crate::dispatcher::init_null_masked_decoder;
use crate::error::{DecodeError, ExhaustedMisuseSnafu, PoisonedMisuseSnafu, Result};
use crate::null_mask::NullMaskDecoder;

/// The public contract every engine-facing row cursor exposes.
pub trait ColumnIterator {
    /// May be called zero or more times; only the first has effect.
    fn init(&mut self) -> Result<()>;

    /// Advances to the next row, initializing first if needed.
    fn next(&mut self) -> Result<()>;

    /// Read-only, idempotent between `next()` calls. `None` means the
    /// current row is SQL null.
    fn current(&self) -> Option<&Cell>;

    /// Whether another `next()` call would yield a row rather than fail.
    fn has_next(&self) -> bool;
}

enum State {
    Fresh {
        column_type: ColumnType,
        cursor: Cursor,
    },
    Streaming(NullMaskDecoder),
    Exhausted,
    Poisoned,
}

/// `new_iterator`'s return type (spec.md §4.D/§4.E). Single-threaded,
/// non-restartable, poisons itself on the first fatal decode error.
pub struct RowIterator {
    state: State,
}

impl RowIterator {
    pub(crate) fn fresh(column_type: ColumnType, cursor: Cursor) -> Self {
        Self {
            state: State::Fresh { column_type, cursor },
        }
    }

    /// Transitions to the terminal poisoned state and returns the original
    /// error to this (first) caller; later callers get `PoisonedMisuse`
    /// instead, since `DecodeError` isn't `Clone`.
    fn poison(&mut self, err: DecodeError) -> DecodeError {
        warn!(error = %err, "decode iterator poisoned");
        self.state = State::Poisoned;
        err
    }
}

impl ColumnIterator for RowIterator {
    fn init(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, State::Exhausted) {
            State::Fresh { column_type, cursor } => match init_null_masked_decoder(column_type, cursor) {
                Ok(decoder) => {
                    self.state = State::Streaming(decoder);
                    Ok(())
                }
                Err(err) => Err(self.poison(err)),
            },
            // init() was already run (or the state is terminal); either way
            // a second call is a no-op per spec.md §4.D ("only the first
            // has effect"). Restore the state we took, don't fall through to
            // Exhausted.
            other => {
                self.state = other;
                Ok(())
            }
        }
    }

    fn next(&mut self) -> Result<()> {
        if matches!(self.state, State::Fresh { .. }) {
            self.init()?;
        }

        match &mut self.state {
            State::Streaming(decoder) => {
                if !decoder.has_next() {
                    self.state = State::Exhausted;
                    return ExhaustedMisuseSnafu.fail();
                }
                match decoder.next() {
                    // Stays in Streaming even once exhausted, so the
                    // just-produced row remains readable via current();
                    // the *next* next() call is what observes Exhausted.
                    Ok(()) => Ok(()),
                    Err(err) => Err(self.poison(err)),
                }
            }
            State::Exhausted => ExhaustedMisuseSnafu.fail(),
            State::Poisoned => PoisonedMisuseSnafu.fail(),
            State::Fresh { .. } => unreachable!("init() above always leaves Fresh"),
        }
    }

    fn current(&self) -> Option<&Cell> {
        match &self.state {
            State::Streaming(decoder) => decoder.current(),
            _ => None,
        }
    }

    fn has_next(&self) -> bool {
        match &self.state {
            State::Fresh { .. } => true,
            State::Streaming(decoder) => decoder.has_next(),
            State::Exhausted | State::Poisoned => false,
        }
    }
}
