#![allow(missing_docs)]

pub(crate) mod storage;

pub(crate) use storage::CountingStorage;
