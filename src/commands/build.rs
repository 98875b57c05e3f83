//! Build the static site

use anyhow::Result;

use crate::generator::BuildReport;
use crate::Site;

/// How to print the build report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Run one build and print its report
pub fn run(site: &Site, site_url: Option<&str>, format: ReportFormat) -> Result<BuildReport> {
    tracing::info!("Building site in {:?}", site.base_dir);
    let report = site.build(site_url);

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => {
            for failure in &report.failures {
                println!(
                    "  [{:?}] {}: {}",
                    failure.phase,
                    failure.item.display(),
                    failure.error
                );
            }
            println!("{}", report.summary());
        }
    }

    Ok(report)
}
