pub mod gemini;

use crate::domain::models::Upstream;

pub type UpstreamBox = Box<dyn Upstream + Send + Sync>;
