pub mod builder;
pub mod languages;
pub mod profile;
pub mod scan;
pub mod unit;
pub mod utils;

pub use builder::{UnitBuilder, UnitContext};
pub use profile::{all_profiles, profiles_named, DirMatcher, FileMatcher, Profile};
pub use scan::{scan, WalkControl};
pub use unit::{sort_units, Unit, UnitKind};
