mod pack_mcmeta;
mod permissive;

pub use pack_mcmeta::*;
pub use permissive::*;
