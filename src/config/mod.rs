//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Annotated example configuration, written by `synesthesia init`
pub const EXAMPLE_CONFIG: &str = include_str!("../../synesthesia.example.yaml");

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<SonifyConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: SonifyConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::SamplerKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
sampler:
  strategy: center

sound:
  threshold: 10.0
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.sampler.strategy, SamplerKind::Center);
        assert_eq!(config.sound.threshold, 10.0);
        assert_eq!(config.grid.columns, 5);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let yaml = r#"
grid:
  rows: 2
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("angle table"));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Path::new("/nonexistent/synesthesia.yaml")).is_err());
    }

    #[test]
    fn test_example_config_is_stock() {
        let config: SonifyConfig = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config, serde_yaml::from_str::<SonifyConfig>("{}").unwrap());
    }
}
