use std::time::Duration;

use listgauge::prelude::*;

fn main() {
    // Keep the 5 most recent errors, none older than 10 minutes
    let gauge = ListGauge::new("recent_errors", 5, Duration::from_secs(600));

    for i in 1..=8 {
        gauge.add(format!("request {i} failed"));
    }

    let exporter = TextExporter::new("demo", std::io::stdout());
    gauge.report(&exporter);
}
