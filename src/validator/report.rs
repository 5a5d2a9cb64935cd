use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

/// Validation check result status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// Individual validation check result
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Name of the validation check
    pub name: String,
    /// Result status of the check
    pub status: CheckStatus,
}

impl ValidationCheck {
    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }

    /// Passed if `condition` holds, failed with `message` otherwise
    pub(crate) fn check(name: impl Into<String>, condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::ok(name)
        } else {
            Self::failed(name, message())
        }
    }
}

/// Complete validation report for one exported fixture set
#[derive(Debug)]
pub struct ValidationReport {
    /// List of individual validation check results
    pub checks: Vec<ValidationCheck>,
    /// Directory and base name that were validated
    pub target: String,
}

impl ValidationReport {
    /// Create a new validation report for the given target
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            target: target.into(),
        }
    }

    /// Add a validation check result to the report
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Check if any validation checks failed
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Check if any validation checks produced warnings
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| matches!(c.status, CheckStatus::Warning(_)))
    }

    /// Count the number of successful checks
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Count the number of warnings
    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| matches!(c.status, CheckStatus::Warning(_))).count()
    }

    /// Count the number of failures
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Failed checks only
    pub fn failures(&self) -> impl Iterator<Item = &ValidationCheck> {
        self.checks.iter().filter(|c| c.status.is_failed())
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        self.render(true)
    }

    fn render(&self, colored: bool) -> String {
        let mut out = String::new();

        out.push_str(&paint("Fixture Validation Report", Tone::Title, colored));
        out.push('\n');
        out.push_str(&paint("=========================", Tone::Title, colored));
        out.push('\n');
        out.push_str(&format!("{}: {}\n\n", paint("Target", Tone::Strong, colored), self.target));

        for check in &self.checks {
            let (symbol, tone) = match &check.status {
                CheckStatus::Ok => ("✓", Tone::Good),
                CheckStatus::Warning(_) => ("⚠", Tone::Warn),
                CheckStatus::Failed(_) => ("✗", Tone::Bad),
            };
            out.push_str(&format!("[{}] {}", symbol, paint(&check.name, tone, colored)));

            match &check.status {
                CheckStatus::Ok => out.push('\n'),
                CheckStatus::Warning(msg) => {
                    out.push_str(&format!(" - {}: {}\n", paint("WARNING", Tone::Warn, colored), msg))
                }
                CheckStatus::Failed(msg) => {
                    out.push_str(&format!(" - {}: {}\n", paint("FAILED", Tone::Bad, colored), msg))
                }
            }
        }

        out.push_str(&format!(
            "\n{}: {} passed, {} warnings, {} failed\n\n",
            paint("Summary", Tone::Strong, colored),
            paint(&self.success_count().to_string(), Tone::Good, colored),
            paint(&self.warning_count().to_string(), Tone::Warn, colored),
            paint(&self.failure_count().to_string(), Tone::Bad, colored),
        ));

        let verdict = if self.has_failures() {
            ("Validation FAILED", Tone::Bad)
        } else if self.has_warnings() {
            ("Validation PASSED with warnings", Tone::Warn)
        } else {
            ("Validation PASSED", Tone::Good)
        };
        out.push_str(&paint(verdict.0, verdict.1, colored));
        out.push('\n');

        out
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Title,
    Strong,
    Good,
    Warn,
    Bad,
}

fn paint(text: &str, tone: Tone, colored: bool) -> String {
    #[cfg(feature = "colorized_output")]
    if colored {
        let styled = style(text);
        let styled = match tone {
            Tone::Title => styled.bold().cyan(),
            Tone::Strong => styled.bold(),
            Tone::Good => styled.green(),
            Tone::Warn => styled.yellow(),
            Tone::Bad => styled.red(),
        };
        return styled.to_string();
    }

    let _ = (tone, colored);
    text.to_string()
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("testdata/userdata");
        report.add_check(ValidationCheck::ok("Test check 1"));
        report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
        report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

        let output = format!("{}", report);
        assert!(output.contains("Target: testdata/userdata"));
        assert!(output.contains("[✓] Test check 1"));
        assert!(output.contains("[⚠] Test check 2 - WARNING: This is a warning"));
        assert!(output.contains("[✗] Test check 3 - FAILED: This failed"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.ends_with("Validation FAILED\n"));
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_check_helper() {
        assert_eq!(ValidationCheck::check("a", true, || unreachable!()).status, CheckStatus::Ok);
        assert_eq!(
            ValidationCheck::check("a", false, || "nope".to_string()).status,
            CheckStatus::Failed("nope".to_string())
        );
    }
}
