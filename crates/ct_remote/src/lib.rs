pub mod config;
pub mod supabase;

pub use config::RemoteConfig;
pub use supabase::RestContentClient;

pub mod prelude {
    pub use super::{RemoteConfig, RestContentClient};
    pub use ct_core::{ContentApi, ContentFilter, Credentials, ProbeStatus, Result, Error};
}
