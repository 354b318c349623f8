//! Metrics command: hours, head counts and labor cost for a range.

use std::io::Write;

use anyhow::Result;
use pt_core::{Clock, DashboardMetrics, KeyValueStore, TimeRange, TimeTrackingStore};
use serde::Serialize;

use super::util::{format_hours, format_money};

#[derive(Debug, Serialize)]
struct MetricsReport {
    range: TimeRange,
    timezone: String,
    #[serde(flatten)]
    metrics: DashboardMetrics,
}

pub fn run<W, S, C>(
    writer: &mut W,
    store: &mut TimeTrackingStore<S, C>,
    range: Option<TimeRange>,
    json: bool,
) -> Result<()>
where
    W: Write,
    S: KeyValueStore,
    C: Clock,
{
    if let Some(range) = range {
        store.set_range(range);
    }
    let range = store.range();
    let metrics = store.metrics();

    if json {
        let report = MetricsReport {
            range,
            timezone: store.clock().zone_name(),
            metrics,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(writer, "Range: {range}")?;
    writeln!(writer, "{:<22}{}", "Hours tracked:", format_hours(metrics.total_hours))?;
    writeln!(writer, "{:<22}{}", "Active employees:", metrics.total_employees)?;
    writeln!(writer, "{:<22}{}", "Open sessions:", metrics.active_sessions)?;
    writeln!(
        writer,
        "{:<22}{}",
        "Average per employee:",
        format_hours(metrics.average_hours_per_employee)
    )?;
    writeln!(writer, "{:<22}{}", "Labor cost:", format_money(metrics.labor_cost))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pt_core::EmployeeId;

    use super::*;
    use crate::commands::fixtures::{render, seeded_store};

    #[test]
    fn week_metrics_for_seed_data() {
        let (mut store, _) = seeded_store();
        let output = render(|w| run(w, &mut store, None, false));
        assert_snapshot!(output.trim_end(), @r"
        Range: week
        Hours tracked:        19h 30m
        Active employees:     2
        Open sessions:        0
        Average per employee: 9h 45m
        Labor cost:           384.00
        ");
    }

    #[test]
    fn today_metrics_count_open_sessions() {
        let (mut store, _) = seeded_store();
        store.clock_in(EmployeeId::new("emp-2").unwrap(), "Maintenance", None);

        let output = render(|w| run(w, &mut store, Some(TimeRange::Today), false));
        assert!(output.contains("Hours tracked:        3h 30m"));
        assert!(output.contains("Open sessions:        1"));
        assert!(output.contains("Labor cost:           63.00"));
    }

    #[test]
    fn json_output_is_flat() {
        let (mut store, _) = seeded_store();
        let output = render(|w| run(w, &mut store, Some(TimeRange::All), true));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["range"], "all");
        assert_eq!(value["totalEmployees"], 2);
        assert_eq!(value["laborCost"], 384.0);
        assert_eq!(value["timezone"], "+00:00");
    }
}
