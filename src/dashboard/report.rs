use crate::dashboard::DashboardView;

fn format_mean(mean: Option<f64>) -> String {
    match mean {
        Some(value) => format!("{:.1}", value),
        None => "-".to_string(),
    }
}

fn list_or_none<T: std::fmt::Display>(values: &[T]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Plain-text rendering of a dashboard view, one section per chart.
pub fn text_report(view: &DashboardView) -> String {
    let mut report = String::new();

    report.push_str("=== Bike Sharing: Weather and Season Effects ===\n");
    report.push_str(&format!(
        "Weather: {}\nSeasons: {}\nRows: {}\n",
        list_or_none(&view.selection.weather),
        list_or_none(&view.selection.seasons),
        view.total_rows
    ));

    if view.total_rows == 0 {
        report.push_str("\nNo data for the current selection.\n");
        return report;
    }

    report.push_str("\nPreview:\n");
    report.push_str("  date        hr  season  weather  temp   hum    cnt\n");
    for row in &view.preview {
        report.push_str(&format!(
            "  {}  {:>2}  {:<6}  {:>7}  {:.2}   {:.2}   {:>4}\n",
            row.date, row.hour, row.season, row.weather, row.temperature, row.humidity, row.rental_count
        ));
    }

    report.push_str("\nRentals by weather condition:\n");
    for summary in &view.aggregates.by_weather {
        let d = &summary.distribution;
        report.push_str(&format!(
            "  {:<22} n={:<6} mean={:>7.1}  min={:.0} q1={:.1} median={:.1} q3={:.1} max={:.0} outliers={}\n",
            summary.weather.to_string(),
            summary.count,
            summary.mean,
            d.min,
            d.q1,
            d.median,
            d.q3,
            d.max,
            d.outliers
        ));
    }

    report.push_str("\nRentals by season:\n");
    for summary in &view.aggregates.by_season {
        let d = &summary.distribution;
        report.push_str(&format!(
            "  {:<8} n={:<6} mean={:>7.1}  min={:.0} q1={:.1} median={:.1} q3={:.1} max={:.0} fences=[{:.1}, {:.1}] outliers={}\n",
            summary.season_label,
            summary.count,
            summary.mean,
            d.min,
            d.q1,
            d.median,
            d.q3,
            d.max,
            d.lower_fence,
            d.upper_fence,
            d.outliers
        ));
    }

    report.push_str("\nMean rentals per hour by season:\n");
    report.push_str("  hr");
    for profile in &view.aggregates.hourly_profile {
        report.push_str(&format!(" {:>8}", profile.season_label));
    }
    report.push('\n');
    for hour in 0..24u8 {
        report.push_str(&format!("  {:>2}", hour));
        for profile in &view.aggregates.hourly_profile {
            report.push_str(&format!(" {:>8}", format_mean(profile.mean_at(hour))));
        }
        report.push('\n');
    }

    report.push_str("\nMean rentals by weather and season:\n");
    for cell in &view.aggregates.by_weather_season {
        report.push_str(&format!(
            "  weather {} / {:<8} n={:<6} mean={:.1}\n",
            cell.weather_code, cell.season_label, cell.count, cell.mean
        ));
    }

    report
}
