//! Workspace-wide constant definitions

/// Config file name searched for in the current and parent directories
pub const CONFIG_FILE: &str = "cardforge.toml";

/// Default input locations, relative to the project root
pub mod inputs {
    pub const TABLE: &str = "input/data/people.csv";
    pub const TEMPLATE: &str = "input/templates/card.svg";
}

/// Default output locations, relative to the project root
pub mod output {
    pub const SVG_DIR: &str = "output/svg";
    pub const PNG_DIR: &str = "output/png";
}

/// Rasterization defaults
pub mod raster {
    /// Resolved via PATH unless the config names an explicit path
    pub const COMMAND: &str = "inkscape";
    pub const WIDTH: u32 = 750;
    pub const HEIGHT: u32 = 1125;
}

/// Header row the strict table policy validates against
pub const EXPECTED_HEADER: &str = "Name,Nickname,Relationship,Birthday,Image";
