pub mod generation_client;

use crate::domain::models::Backend;

pub type BackendBox = Box<dyn Backend + Send + Sync>;
