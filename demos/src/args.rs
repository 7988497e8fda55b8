use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cookbook::config::{ConfigError, DemoConfig};

#[derive(Debug, Parser)]
#[command(about = "Small OpenGL demo programs")]
pub struct Args {
    /// Demo to run
    #[arg(value_enum)]
    pub demo: DemoKind,
    /// JSON5 file with window and input settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Window width, overrides the config file
    #[arg(long)]
    pub width: Option<u32>,
    /// Window height, overrides the config file
    #[arg(long)]
    pub height: Option<u32>,
    /// Present frames as fast as possible
    #[arg(long)]
    pub no_vsync: bool,
    /// Directory with textures, overrides the config file
    #[arg(short, long)]
    pub resources: Option<PathBuf>,
}

impl Args {
    /// Reads the config file if one was given and applies command line overrides.
    pub fn config(&self) -> Result<DemoConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load(path)?,
            None => DemoConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.no_vsync {
            config.vsync = false;
        }
        if let Some(resources) = &self.resources {
            config.resources = resources.clone();
        }

        config.validate()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    Clear,
    Point,
    Triangle,
    CubeSwarm,
    CubePyramid,
    SpinningCube,
    UniformBlock,
    Skydome,
    Skybox,
}

impl DemoKind {
    pub fn title(&self) -> &'static str {
        match self {
            DemoKind::Clear => "Clear",
            DemoKind::Point => "Point",
            DemoKind::Triangle => "Simple animation",
            DemoKind::CubeSwarm => "Cube swarm",
            DemoKind::CubePyramid => "Cube and pyramid",
            DemoKind::SpinningCube => "Spinning cube",
            DemoKind::UniformBlock => "Uniform block",
            DemoKind::Skydome => "Skydome",
            DemoKind::Skybox => "Cube map skybox",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_names_are_kebab_case() {
        let args = Args::try_parse_from(["gl-demos", "cube-swarm"]).unwrap();

        assert_eq!(args.demo, DemoKind::CubeSwarm);
        assert!(Args::try_parse_from(["gl-demos", "cube_swarm"]).is_err());
    }

    #[test]
    fn overrides_replace_defaults() {
        let args = Args::try_parse_from([
            "gl-demos",
            "skybox",
            "--width",
            "1024",
            "--no-vsync",
            "--resources",
            "assets",
        ])
        .unwrap();

        let config = args.config().unwrap();

        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert!(!config.vsync);
        assert_eq!(config.resources, PathBuf::from("assets"));
    }

    #[test]
    fn zero_size_is_rejected() {
        let args = Args::try_parse_from(["gl-demos", "clear", "--height", "0"]).unwrap();

        assert!(matches!(args.config(), Err(ConfigError::Invalid(_))));
    }
}
