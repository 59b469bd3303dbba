pub mod boot;
pub mod play;
pub mod util;
