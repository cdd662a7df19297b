//! SVG chart rendering for the report queries.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use plotters::prelude::*;

const CHART_SIZE: (u32, u32) = (900, 600);
const CAPTION_FONT: (&str, i32) = ("sans-serif", 22);
const TEMPERATURE_LABEL: &str = "Temperature (Celsius)";

/// Box plot of the mean-temperature distribution per calendar month.
pub fn render_boxplot(
    months: &BTreeMap<u32, Vec<f32>>,
    from_year: i32,
    to_year: i32,
    path: &Path,
) -> Result<()> {
    let quartiles: Vec<(u32, Quartiles)> = months
        .iter()
        .filter(|(_, means)| !means.is_empty())
        .map(|(month, means)| (*month, Quartiles::new(means)))
        .collect();
    if quartiles.is_empty() {
        bail!("no mean temperatures stored between {from_year} and {to_year}");
    }

    let (low, high) = padded_bounds(months.values().flatten().copied());

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!("Monthly Temperature Distribution for: {from_year} to {to_year}");
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d((1u32..13u32).into_segmented(), low..high)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc(TEMPERATURE_LABEL)
        .draw()?;

    chart.draw_series(
        quartiles
            .iter()
            .map(|(month, quartiles)| Boxplot::new_vertical(SegmentValue::CenterOf(*month), quartiles)),
    )?;

    root.present().context("writing the chart")?;

    Ok(())
}

/// Line plot of one month's daily mean temperatures.
pub fn render_lineplot(
    days: &[u32],
    means: &[f32],
    year: i32,
    month: u32,
    path: &Path,
) -> Result<()> {
    if days.is_empty() {
        bail!("no mean temperatures stored for {}", month_title(year, month));
    }

    let (low, high) = padded_bounds(means.iter().copied());

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!(
        "Daily Temperature Distribution for: {}",
        month_title(year, month)
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(0u32..32u32, low..high)?;

    chart
        .configure_mesh()
        .x_desc("Day")
        .y_desc(TEMPERATURE_LABEL)
        .draw()?;

    chart.draw_series(LineSeries::new(
        days.iter().zip(means).map(|(day, mean)| (*day, *mean)),
        &BLUE,
    ))?;

    root.present().context("writing the chart")?;

    Ok(())
}

/// Y-axis range spanning the data with a little headroom. Callers reject
/// empty input before getting here.
fn padded_bounds(means: impl Iterator<Item = f32>) -> (f32, f32) {
    let mut low = f32::MAX;
    let mut high = f32::MIN;
    for mean in means {
        low = low.min(mean);
        high = high.max(mean);
    }
    if low > high {
        return (0.0, 1.0);
    }

    (low - 2.0, high + 2.0)
}

/// "November, 2020" for the line plot caption.
fn month_title(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%B, %Y").to_string(),
        None => format!("{year}-{month:02}"),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn should_render_a_boxplot_to_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxplot.svg");
        let mut months: BTreeMap<u32, Vec<f32>> =
            (1..=12).map(|month| (month, Vec::new())).collect();
        months.insert(1, vec![-20.0, -15.0, -18.5, -10.0]);
        months.insert(7, vec![24.0, 26.5, 22.0, 25.0]);

        render_boxplot(&months, 2019, 2020, &path).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn should_render_a_lineplot_to_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineplot.svg");

        render_lineplot(
            &[1, 2, 3, 5],
            &[-1.0, 0.5, 2.0, 1.5],
            2020,
            11,
            &path,
        )
        .unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn should_refuse_to_plot_an_empty_range() {
        let dir = tempfile::tempdir().unwrap();
        let empty: BTreeMap<u32, Vec<f32>> = (1..=12).map(|month| (month, Vec::new())).collect();

        assert!(render_boxplot(&empty, 2019, 2020, &dir.path().join("b.svg")).is_err());
        assert!(render_lineplot(&[], &[], 2020, 11, &dir.path().join("l.svg")).is_err());
    }

    #[test]
    fn should_spell_out_the_month_in_the_title() {
        assert_eq!(month_title(2020, 11), "November, 2020");
    }
}
