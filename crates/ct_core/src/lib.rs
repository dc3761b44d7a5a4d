pub mod clock;
pub mod error;
pub mod remote;
pub mod render;
pub mod storage;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use remote::{ContentApi, ContentFilter, ProbeStatus};
pub use render::{PageError, Renderer};
pub use storage::KeyValueStore;
pub use types::*;
