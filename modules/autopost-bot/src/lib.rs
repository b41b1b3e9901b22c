pub mod composer;
pub mod media;
pub mod pipeline;
pub mod records;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
