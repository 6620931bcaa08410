//! Invocation of the external log-to-JSON converter
//!
//! The converter is an opaque command line tool. It is given the raw log and a
//! settings file and writes `<stem><suffix>.json` into its output directory.
//! Anything that goes wrong is passed upward as a [`ConversionError`]; no
//! retries happen here.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use super::{ConversionError, ConverterConfig};

pub struct LogConverter {
    config: ConverterConfig,
}

impl LogConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Where the converter writes the document for `log`.
    ///
    /// The stem is everything before the first `.`, so `fight.evtc.zip`
    /// and `fight.zevtc` both map to `fight<suffix>.json`.
    pub fn output_path(&self, log: &Path) -> Result<PathBuf, ConversionError> {
        let stem = log
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('.').next())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConversionError::InvalidLogName {
                path: log.to_path_buf(),
            })?;

        Ok(Path::new(&self.config.output_directory)
            .join(format!("{stem}{}.json", self.config.output_suffix)))
    }

    /// Run the converter on `log` and return the path of the JSON document.
    pub async fn convert(&self, log: &Path) -> Result<PathBuf, ConversionError> {
        if self.config.executable.is_empty() {
            return Err(ConversionError::NotConfigured);
        }
        let output_path = self.output_path(log)?;

        let mut command = Command::new(&self.config.executable);
        command.arg("-p");
        if !self.config.config_file.is_empty() {
            command.arg("-c").arg(&self.config.config_file);
        }
        command.arg(log);

        tracing::info!(log = %log.display(), "Converting combat log");
        let output = command
            .output()
            .await
            .map_err(|source| ConversionError::Spawn {
                executable: self.config.executable.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            tracing::debug!(stdout = %stdout.trim(), "Converter output");
        }

        if !output.status.success() {
            return Err(ConversionError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
            return Err(ConversionError::MissingOutput { path: output_path });
        }

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> LogConverter {
        LogConverter::new(ConverterConfig {
            executable: String::new(),
            config_file: String::new(),
            output_directory: "/data/input".to_string(),
            output_suffix: "_wvw_kill".to_string(),
        })
    }

    #[test]
    fn output_path_uses_stem_and_suffix() {
        let path = converter()
            .output_path(Path::new("/logs/WvW (1)/20240101-203011.zevtc"))
            .unwrap();
        assert_eq!(path, PathBuf::from("/data/input/20240101-203011_wvw_kill.json"));
    }

    #[test]
    fn output_path_strips_every_extension() {
        let path = converter()
            .output_path(Path::new("20240101-203011.evtc.zip"))
            .unwrap();
        assert_eq!(path, PathBuf::from("/data/input/20240101-203011_wvw_kill.json"));
    }

    #[test]
    fn output_path_rejects_nameless_logs() {
        assert!(matches!(
            converter().output_path(Path::new(".evtc")),
            Err(ConversionError::InvalidLogName { .. })
        ));
    }

    #[tokio::test]
    async fn unconfigured_converter_fails_fast() {
        let result = converter().convert(Path::new("fight.evtc")).await;
        assert!(matches!(result, Err(ConversionError::NotConfigured)));
    }
}
