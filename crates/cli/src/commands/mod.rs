pub mod apps;
pub mod config;
pub mod license;
pub mod scan;
pub mod util;

pub use apps::*;
pub use config::*;
pub use license::*;
pub use scan::*;
pub use util::*;
