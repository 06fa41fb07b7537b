//! AARs built with soong carry the classes of all their dependencies and no
//! resources. This crate takes such an AAR, strips the dependency classes
//! from its `classes.jar` and adds resource folders under `res/`.
//!
//! ```no_run
//! use slim_aar::{slim_aar, SlimConfig};
//!
//! let config = SlimConfig::new(
//!     "com/android/car/ui/",
//!     "car-ui-lib.aar",
//!     "car-ui-lib-soong.aar",
//!     vec!["res".into()],
//! )?;
//! let report = slim_aar(&config)?;
//! println!("kept {} classes", report.classes_kept);
//! # Ok::<(), slim_aar::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod resources;
pub mod slim;

pub use config::SlimConfig;
pub use error::{Error, Result};
pub use filter::ClassFilter;
pub use slim::{slim_aar, SlimReport, CLASSES_JAR};
