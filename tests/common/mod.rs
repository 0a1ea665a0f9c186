#![allow(unused_imports)]

pub use nodehook_test_utils::{init_tracing, with_timeout};
