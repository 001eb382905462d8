// src/result/render.rs
use super::{MonitorResult, RunReport};
use crate::level::NotificationLevel;
use std::fmt::Write;

impl MonitorResult {
    /// Human readable report containing everything at or above `threshold`.
    ///
    /// An engine failure is always rendered in full.
    pub fn render_plain_text(&self, threshold: NotificationLevel) -> String {
        match self {
            MonitorResult::Normal(report) => report.render_plain_text(threshold),
            MonitorResult::Critical(failure) => {
                format!("{}\n{}", failure.message, failure.details)
            }
        }
    }
}

impl RunReport {
    pub fn render_plain_text(&self, threshold: NotificationLevel) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", self.message());

        for layer in &self.layer_results {
            if layer.level() < threshold {
                continue;
            }
            let _ = writeln!(out, "[{}] {}", layer.level(), layer.layer_name());

            for check in layer.check_results() {
                if check.level < threshold {
                    continue;
                }
                // Multi-line messages continue indented under their check.
                let mut lines = check.message.as_deref().unwrap_or("").lines();
                let _ = writeln!(
                    out,
                    "  [{}] {} / {}: {}",
                    check.level,
                    layer.layer_name(),
                    check.check_name,
                    lines.next().unwrap_or("")
                );
                for line in lines {
                    let _ = writeln!(out, "    {}", line);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use crate::level::NotificationLevel::*;
    use crate::result::*;
    use chrono::Utc;

    fn report() -> MonitorResult {
        let mut report = RunReport::new(Utc::now());
        report.layer_results.push(LayerResult::new(
            "network",
            vec![
                CheckResult::new("dns", Okay).with_message("resolved"),
                CheckResult::new("gateway", Warning).with_message("slow"),
            ],
        ));
        report.layer_results.push(LayerResult::new(
            "database",
            vec![CheckResult::new("ping", Error)],
        ));
        MonitorResult::Normal(report)
    }

    #[test]
    fn test_render_filters_by_threshold() {
        let text = report().render_plain_text(Error);

        assert!(text.starts_with("Error: layer 'database' reported problems."));
        assert!(text.contains("[Error] database"));
        assert!(text.contains("  [Error] database / ping: \n"));
        assert!(!text.contains("network"));
    }

    #[test]
    fn test_render_includes_everything_at_okay() {
        let text = report().render_plain_text(Okay);

        assert!(text.contains("network / dns: resolved"));
        assert!(text.contains("[Warning] network / gateway: slow"));
        assert!(text.contains("[Error] database"));
    }

    #[test]
    fn test_render_indents_multi_line_check_messages() {
        let mut report = RunReport::new(Utc::now());
        report.layer_results.push(LayerResult::new(
            "L",
            vec![CheckResult::new("raiser", Critical).with_message("first\n\tsecond\n\tthird")],
        ));

        let text = MonitorResult::Normal(report).render_plain_text(Critical);

        assert!(text.ends_with("  [Critical] L / raiser: first\n    \tsecond\n    \tthird\n"));
    }

    #[test]
    fn test_render_critical_ignores_threshold() {
        let result = MonitorResult::Critical(CriticalFailure {
            message: "The monitor failed.".into(),
            details: "Monitor itself failed:\nsomething truly terrible\n".into(),
            at: None,
        });

        let text = result.render_plain_text(Critical);
        assert!(text.contains("The monitor failed."));
        assert!(text.contains("something truly terrible"));
    }
}
