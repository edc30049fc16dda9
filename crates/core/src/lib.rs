// crates/core/src/lib.rs
pub mod error;
pub mod fanout;
pub mod registry;
pub mod stream;

pub use error::*;
pub use fanout::*;
pub use registry::*;
pub use stream::*;
