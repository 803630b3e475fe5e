//! DocumentStore integration tests
//!
//! `operations` runs against whichever store TEST_BACKEND selects;
//! `persistence` covers the InMemory JSON snapshot and the SQLite file store.

mod operations;
