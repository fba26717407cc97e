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

//! The columnar decode path of an in-memory analytics store: a buffer
//! dispatcher, a family of primitive decoders keyed by compression type, a
//! null-bitmap wrapper, and a lazily-initializing row-cursor iterator
//! facade that an engine drives via [`ColumnIterator`].
//!
//! The only public entry points are [`new_iterator`] / [`new_iterator_le`];
//! everything else in this crate exists to serve those two functions.

pub mod byte_order;
pub mod cell;
pub mod column_type;
pub mod compression;
pub mod decoder;
pub mod dispatcher;
pub mod error;
pub mod iterator;
mod null_mask;

pub use byte_order::ByteOrder;
pub use cell::Cell;
pub use column_type::{ColumnType, GenericDeserializer};
pub use compression::CompressionType;
pub use dispatcher::{new_iterator, new_iterator_le};
pub use error::{DecodeError, Result};
pub use iterator::{ColumnIterator, RowIterator};
