//! Configuration: settings file and path defaults.
//!
//! Resolution happens once, at the CLI boundary. The orchestrators receive
//! plain paths and never consult configuration themselves.

mod path;
mod settings;

pub use path::{
    DEFAULT_PROFILE_SUBPATH, default_profile_root, default_settings_path, expand_home, home_dir,
};
pub use settings::{Settings, load_settings, load_settings_from_str};
