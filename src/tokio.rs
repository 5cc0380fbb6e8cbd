use std::sync::LazyLock;
use tokio::runtime::Runtime;

// Runtime the blocking verification entry points run registry lookups on
pub static TOKIO_RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("Failed to create Tokio runtime"));
