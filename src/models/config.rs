//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the binaries that open the salon database.
pub struct AppConfig {
    pub database_url: String,
    /// Password assigned to every seeded employee login.
    pub seed_password: String,
    /// Whether the seeder books sample appointments for the current week.
    #[serde(default = "default_seed_appointments")]
    pub seed_appointments: bool,
}

fn default_seed_appointments() -> bool {
    true
}
