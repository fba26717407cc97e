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

//! Byte order the writer chose for a given buffer.
//!
//! spec.md §9 flags that the current on-wire layout relies on writer and
//! reader running on compatible hardware, with persisting a byte-order
//! marker noted as a future hardening item. Until that marker exists, the
//! order has to be supplied out of band by the caller; we make that
//! explicit here rather than silently assuming native endianness.

use bytes::{Buf, Bytes};
use snafu::ensure;

use crate::error::{Result, TruncatedValueSnafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// A duplicated, independent read cursor over a borrowed buffer.
///
/// Duplicating is what lets [`crate::dispatcher::new_iterator`] construct an
/// iterator without disturbing the caller's own view of the buffer (spec.md
/// §3: "duplicated... so construction does not disturb caller state").
pub struct Cursor {
    bytes: Bytes,
    order: ByteOrder,
}

macro_rules! read_fixed {
    ($name:ident, $ty:ty, $le:ident, $be:ident) => {
        pub fn $name(&mut self) -> Result<$ty> {
            self.require(std::mem::size_of::<$ty>())?;
            Ok(match self.order {
                ByteOrder::LittleEndian => self.bytes.$le(),
                ByteOrder::BigEndian => self.bytes.$be(),
            })
        }
    };
}

impl Cursor {
    pub fn new(bytes: Bytes, order: ByteOrder) -> Self {
        Self { bytes, order }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.remaining()
    }

    pub fn has_remaining(&self) -> bool {
        self.bytes.has_remaining()
    }

    fn require(&self, n: usize) -> Result<()> {
        ensure!(
            self.bytes.remaining() >= n,
            TruncatedValueSnafu {
                needed: n,
                remaining: self.bytes.remaining(),
            }
        );
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        Ok(self.bytes.get_u8())
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.require(1)?;
        Ok(self.bytes.get_i8())
    }

    read_fixed!(read_i16, i16, get_i16_le, get_i16);
    read_fixed!(read_u16, u16, get_u16_le, get_u16);
    read_fixed!(read_i32, i32, get_i32_le, get_i32);
    read_fixed!(read_u32, u32, get_u32_le, get_u32);
    read_fixed!(read_i64, i64, get_i64_le, get_i64);
    read_fixed!(read_u64, u64, get_u64_le, get_u64);
    read_fixed!(read_f32, f32, get_f32_le, get_f32);
    read_fixed!(read_f64, f64, get_f64_le, get_f64);

    /// Read `n` raw bytes as a zero-copy slice of the underlying buffer.
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.require(n)?;
        Ok(self.bytes.copy_to_bytes(n))
    }

    /// Read a 4-byte length prefix followed by that many raw bytes, as used
    /// by STRING/BINARY/GENERIC (spec.md §4.A).
    pub fn read_length_prefixed(&mut self) -> Result<Bytes> {
        let len = self.read_i32()?;
        let len = usize::try_from(len).unwrap_or(0);
        self.read_bytes(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_respect_byte_order() {
        let bytes = Bytes::from_static(&[0x01, 0x00, 0x00, 0x00]);
        let mut le = Cursor::new(bytes.clone(), ByteOrder::LittleEndian);
        assert_eq!(le.read_i32().unwrap(), 1);

        let mut be = Cursor::new(bytes, ByteOrder::BigEndian);
        assert_eq!(be.read_i32().unwrap(), 1 << 24);
    }

    #[test]
    fn truncated_read_is_an_error() {
        let mut cursor = Cursor::new(Bytes::from_static(&[0x01]), ByteOrder::LittleEndian);
        assert!(cursor.read_i32().is_err());
    }
}
