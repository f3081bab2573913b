use super::registry;
use crate::boundary::eval::Driver;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(
        "Interface section already declares analysis_components; cannot also embed a driver identity"
    )]
    ConfigurationConflict,
}

/// The named text sections of a study configuration, written to a file in a
/// fixed order.
///
/// Each section is an ordered list of lines and may be replaced wholesale,
/// either through the chainable setters or by assigning the public field.
/// The defaults describe a baseline single-objective parametric study over
/// two continuous design variables, with a callback-style interface
/// declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyInput {
    pub environment: Vec<String>,
    pub method: Vec<String>,
    pub model: Vec<String>,
    pub variables: Vec<String>,
    pub interface: Vec<String>,
    pub responses: Vec<String>,
}

impl Default for StudyInput {
    fn default() -> Self {
        Self {
            environment: lines(["tabular_graphics_data"]),
            method: lines(["multidim_parameter_study", "  partitions = 4 4"]),
            model: lines(["single"]),
            variables: lines([
                "continuous_design = 2",
                "  lower_bounds    3    5",
                "  upper_bounds    4    6",
                "  descriptors   'x1' 'x2'",
            ]),
            interface: lines([
                "deactivate evaluation_cache",
                "direct",
                "  analysis_drivers = 'dispatch'",
            ]),
            responses: lines([
                "num_objective_functions = 1",
                "no_gradients",
                "no_hessians",
            ]),
        }
    }
}

fn lines<const N: usize>(content: [&str; N]) -> Vec<String> {
    content.into_iter().map(String::from).collect()
}

impl StudyInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.environment = lines.into_iter().map(Into::into).collect();
        self
    }
    pub fn method(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.method = lines.into_iter().map(Into::into).collect();
        self
    }
    pub fn model(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.model = lines.into_iter().map(Into::into).collect();
        self
    }
    pub fn variables(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.variables = lines.into_iter().map(Into::into).collect();
        self
    }
    pub fn interface(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.interface = lines.into_iter().map(Into::into).collect();
        self
    }
    pub fn responses(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.responses = lines.into_iter().map(Into::into).collect();
        self
    }

    fn sections(&self) -> [(&'static str, &[String]); 6] {
        [
            ("environment", &self.environment),
            ("method", &self.method),
            ("model", &self.model),
            ("variables", &self.variables),
            ("interface", &self.interface),
            ("responses", &self.responses),
        ]
    }

    /// Writes the configuration to `path`, sections in fixed order, each
    /// header on its own line and each content line indented by one tab.
    ///
    /// If `driver` is supplied, it is registered in the identity registry
    /// and an `analysis_components` line carrying the minted key is appended
    /// to the interface section; the key is returned. The identity stays
    /// resolvable by the dispatcher for the remainder of the driver's
    /// lifetime. At most one identity is embedded per written configuration.
    ///
    /// # Errors
    ///
    /// - [`InputError::ConfigurationConflict`] if `driver` is supplied but
    ///   the interface section already declares `analysis_components`. The
    ///   partially written file is left on disk: it shows exactly how far
    ///   the write got, and the next successful write truncates it.
    /// - [`InputError::Io`] for filesystem failures.
    pub fn write(
        &self,
        path: &Path,
        driver: Option<&Arc<dyn Driver>>,
    ) -> Result<Option<String>, InputError> {
        let io_err = |source: std::io::Error| InputError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        let mut identity = None;

        for (name, content) in self.sections() {
            writeln!(out, "{name}").map_err(io_err)?;
            for line in content {
                writeln!(out, "\t{line}").map_err(io_err)?;
            }

            if name == "interface" {
                if let Some(driver) = driver {
                    if content.iter().any(|l| l.contains("analysis_components")) {
                        return Err(InputError::ConfigurationConflict);
                    }
                    let key = registry::register(driver);
                    writeln!(out, "\t  analysis_components = '{key}'").map_err(io_err)?;
                    debug!(key = %key, path = %path.display(), "embedded driver identity");
                    identity = Some(key);
                }
            }
        }

        out.flush().map_err(io_err)?;
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::eval::{EvalError, EvalRequest, EvalResponse};
    use std::fs;

    struct NullDriver;

    impl Driver for NullDriver {
        fn evaluate(&self, _request: &EvalRequest) -> Result<EvalResponse, EvalError> {
            Ok(EvalResponse::default())
        }
    }

    fn section_headers(text: &str) -> Vec<&str> {
        text.lines().filter(|l| !l.starts_with('\t')).collect()
    }

    #[test]
    fn default_write_produces_six_sections_in_fixed_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.in");

        let key = StudyInput::default().write(&path, None).unwrap();
        assert!(key.is_none());

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            section_headers(&text),
            vec![
                "environment",
                "method",
                "model",
                "variables",
                "interface",
                "responses"
            ]
        );
        assert!(text.contains("\tcontinuous_design = 2\n"));
        assert!(!text.contains("analysis_components"));
    }

    #[test]
    fn every_content_line_is_tab_indented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.in");
        StudyInput::default().write(&path, None).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let headers = section_headers(&text);
        for line in text.lines() {
            assert!(headers.contains(&line) || line.starts_with('\t'), "{line:?}");
        }
    }

    #[test]
    fn embedded_identity_is_the_last_interface_line_and_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.in");
        let driver: Arc<dyn Driver> = Arc::new(NullDriver);

        let key = StudyInput::default()
            .write(&path, Some(&driver))
            .unwrap()
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let interface_block: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "interface")
            .skip(1)
            .take_while(|l| l.starts_with('\t'))
            .collect();
        assert_eq!(
            interface_block.last().copied(),
            Some(format!("\t  analysis_components = '{key}'").as_str())
        );

        let resolved = registry::resolve(&key).unwrap();
        assert!(Arc::ptr_eq(&driver, &resolved));
    }

    #[test]
    fn manual_analysis_components_with_driver_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.in");
        let driver: Arc<dyn Driver> = Arc::new(NullDriver);

        let input = StudyInput::default().interface([
            "direct",
            "  analysis_drivers = 'dispatch'",
            "  analysis_components = 'hand-written'",
        ]);
        let err = input.write(&path, Some(&driver)).unwrap_err();
        assert!(matches!(err, InputError::ConfigurationConflict));

        // The partial file stays on disk as a diagnostic.
        assert!(path.exists());
    }

    #[test]
    fn manual_analysis_components_without_driver_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.in");

        let input = StudyInput::default().interface(["  analysis_components = 'hand-written'"]);
        let key = input.write(&path, None).unwrap();
        assert!(key.is_none());
    }

    #[test]
    fn sections_are_replaced_wholesale() {
        let input = StudyInput::default().method(["sampling", "  samples = 20"]);
        assert_eq!(input.method, vec!["sampling", "  samples = 20"]);
        // Untouched sections keep their defaults.
        assert_eq!(input.model, vec!["single"]);
    }
}
