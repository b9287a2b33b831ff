use crate::core::suite::SmokeSuite;
use crate::core::{CheckReport, CheckStatus, Storage};
use crate::utils::error::Result;

/// Drives the checks strictly in order, rendering each report as it lands.
/// A rejected check is printed and the run moves on; only transport, parse,
/// or I/O failures bubble up to the caller.
pub struct SmokeRunner<S: Storage> {
    suite: SmokeSuite<S>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub reports: Vec<CheckReport>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_passed()).count()
    }

    pub fn rejected(&self) -> usize {
        self.reports.len() - self.passed()
    }
}

impl<S: Storage> SmokeRunner<S> {
    pub fn new(suite: SmokeSuite<S>) -> Self {
        Self { suite }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let mut reports = Vec::with_capacity(6);

        print_section("1. Daily stats");
        reports.push(render(self.suite.daily_stats().await?));

        print_section("2. Contacts (top 5)");
        reports.push(render(self.suite.contacts().await?));

        print_section("3. Chats (top 5)");
        reports.push(render(self.suite.chats().await?));

        print_section("4. Latest messages (top 3)");
        reports.push(render(self.suite.messages().await?));

        print_section("5. Contacts CSV export");
        reports.push(render(self.suite.export_contacts().await?));

        print_section("6. Send message examples");
        reports.push(render(self.suite.send_examples()?));

        Ok(RunSummary { reports })
    }
}

pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!(" {}", title);
    println!("{}\n", "=".repeat(50));
}

fn render(report: CheckReport) -> CheckReport {
    match &report.status {
        CheckStatus::Passed => {
            println!("✅ ok");
            for line in &report.lines {
                println!("   {}", line);
            }
        }
        CheckStatus::Rejected { status, body } => {
            tracing::warn!("{} rejected with HTTP {}", report.name, status);
            println!("❌ failed: {}", status);
            println!("   {}", body);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CheckReport;

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            reports: vec![
                CheckReport::passed("a", vec![]),
                CheckReport::rejected("b", 500, "boom".to_string()),
                CheckReport::passed("c", vec![]),
            ],
        };
        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.rejected(), 1);
    }
}
