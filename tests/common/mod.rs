#![allow(dead_code)]

pub use dyncomp_test_utils::builders;
pub use dyncomp_test_utils::sink;
pub use dyncomp_test_utils::{init_tracing, with_timeout};

use std::sync::Arc;

use dyncomp::fs::mock::MockFileSystem;
use dyncomp::resolve::ConfigResolver;

/// A resolver backed by the given in-memory filesystem.
pub fn mock_resolver(fs: &MockFileSystem) -> ConfigResolver {
    ConfigResolver::new(Arc::new(fs.clone()))
}
