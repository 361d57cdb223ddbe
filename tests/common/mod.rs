#![allow(dead_code, unused_imports)]

pub use amplify_dash_test_utils::builders;
pub use amplify_dash_test_utils::{FAKE_BASE, FakeTransport, init_tracing, with_timeout};
