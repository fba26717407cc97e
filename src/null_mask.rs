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

//! Null-mask wrapper (spec.md §4.C): projects null/non-null rows through an
//! inner primitive decoder, given the already-parsed sorted null-index
//! list.

use crate::cell::Cell;
use crate::decoder::PrimitiveDecoder;
use crate::error::Result;

pub struct NullMaskDecoder {
    inner: Box<dyn PrimitiveDecoder + Send>,
    null_indices: Vec<u32>,
    null_ptr: usize,
    row: u32,
    current: Option<Cell>,
}

impl NullMaskDecoder {
    pub fn new(inner: Box<dyn PrimitiveDecoder + Send>, null_indices: Vec<u32>) -> Self {
        Self {
            inner,
            null_indices,
            null_ptr: 0,
            row: 0,
            current: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.null_ptr < self.null_indices.len() || self.inner.has_next()
    }

    /// Advances to the next row. Increments the row counter first (spec.md
    /// §4.C: "so the first row has index 0 when tested"), then either
    /// consumes a null index or delegates to the inner decoder.
    pub fn next(&mut self) -> Result<()> {
        self.row += 1;
        let is_null = self
            .null_indices
            .get(self.null_ptr)
            .is_some_and(|&idx| idx == self.row - 1);

        if is_null {
            self.null_ptr += 1;
            self.current = None;
        } else {
            let value = self.inner.next()?.clone();
            self.current = Some(value);
        }
        Ok(())
    }

    /// Idempotent between `next()` calls (spec.md §4.C/§8).
    pub fn current(&self) -> Option<&Cell> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_order::{ByteOrder, Cursor};
    use crate::column_type::ColumnType;
    use crate::decoder::dictionary::DictionaryDecoder;
    use bytes::{BufMut, Bytes, BytesMut};

    fn string_dict_buffer(entries: &[&str], codes: &[i16]) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_i32_le(entries.len() as i32);
        for entry in entries {
            buf.put_i32_le(entry.len() as i32);
            buf.put_slice(entry.as_bytes());
        }
        for &code in codes {
            buf.put_i16_le(code);
        }
        buf.freeze()
    }

    #[test]
    fn projects_nulls_at_given_indices() {
        // rows: ["a", null, "b", "a", "b"], null at index 1, dictionary ["a", "b"]
        let cursor = Cursor::new(
            string_dict_buffer(&["a", "b"], &[0, 1, 0, 1]),
            ByteOrder::LittleEndian,
        );
        let inner = Box::new(DictionaryDecoder::new(ColumnType::String, cursor).unwrap());
        let mut wrapper = NullMaskDecoder::new(inner, vec![1]);

        let mut decoded = vec![];
        while wrapper.has_next() {
            wrapper.next().unwrap();
            let value = wrapper
                .current()
                .map(|c| String::from_utf8(c.as_bytes().unwrap().to_vec()).unwrap());
            decoded.push(value);
        }
        assert_eq!(
            decoded,
            vec![
                Some("a".to_string()),
                None,
                Some("b".to_string()),
                Some("a".to_string()),
                Some("b".to_string()),
            ]
        );
    }

    #[test]
    fn current_is_idempotent_between_next_calls() {
        let cursor = Cursor::new(string_dict_buffer(&["a"], &[0]), ByteOrder::LittleEndian);
        let inner = Box::new(DictionaryDecoder::new(ColumnType::String, cursor).unwrap());
        let mut wrapper = NullMaskDecoder::new(inner, vec![]);
        wrapper.next().unwrap();
        let first = wrapper.current().cloned();
        let second = wrapper.current().cloned();
        assert_eq!(first, second);
    }
}
