//! Text charts of grouped analysis data
//!
//! Each valid group becomes one bar whose height is the group's median
//! y-value. The chart is drawn with ratatui's `BarChart` into an off-screen
//! buffer, saved as plain text and optionally echoed to the terminal.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Widget};

use super::ansi::paint_spans;
use crate::error::JlensError;
use crate::json::{as_number, display_value};
use crate::stats::{Grouping, Summary, linear_regression};
use crate::theme;

const CHART_HEIGHT: u16 = 16;
const MAX_BAR_WIDTH: u16 = 12;

/// Everything needed to draw one chart
pub struct ChartRequest<'a> {
    pub grouping: &'a Grouping,
    /// Where the text chart is written; parent directories are created
    pub output: PathBuf,
    /// Give every bar its own color instead of the shared bar color
    pub multiple_colors: bool,
    /// Also print the chart to the terminal
    pub show: bool,
}

pub trait ChartRenderer {
    /// Draw the chart and return where it was saved
    ///
    /// Returns `Ok(None)` when the grouping has nothing to draw.
    fn render(&mut self, request: &ChartRequest<'_>) -> Result<Option<PathBuf>, JlensError>;
}

/// Where the chart for `x_field` against `y_label` goes: a directory named
/// after the input file, next to it
pub fn chart_path(input: Option<&Path>, x_field: &str, y_label: &str) -> PathBuf {
    let dir = match input {
        Some(path) => path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(path.file_stem().unwrap_or_default()),
        None => PathBuf::from("stdin"),
    };
    dir.join(format!(
        "{}_{}.txt",
        x_field.replace('/', "_"),
        y_label.replace('/', "_")
    ))
}

/// "set_size" -> "Set Size"
fn title_case(name: &str) -> String {
    name.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

struct GroupBar {
    label: String,
    median: f64,
    count: usize,
}

/// A drawn chart: the bar area plus the legend printed below it
struct Drawing {
    buffer: Buffer,
    legend: Vec<String>,
}

/// Renders bar charts as text files
pub struct TextChartRenderer<W: Write> {
    out: W,
    width: u16,
    color: bool,
}

impl<W: Write> TextChartRenderer<W> {
    /// `out` receives the chart when a request asks for it to be shown
    pub fn new(out: W, width: usize, color: bool) -> Self {
        Self {
            out,
            width: u16::try_from(width).unwrap_or(u16::MAX).max(20),
            color,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&self, request: &ChartRequest<'_>) -> Option<Drawing> {
        let grouping = request.grouping;
        let bars: Vec<GroupBar> = grouping
            .valid_groups()
            .map(|group| {
                let numbers: Vec<f64> = group.values.iter().filter_map(as_number).collect();
                GroupBar {
                    label: display_value(&group.key),
                    median: Summary::of(&numbers).map_or(0.0, |s| s.median),
                    count: group.len(),
                }
            })
            .collect();
        if bars.is_empty() {
            return None;
        }

        let x_title = title_case(grouping.field());
        let y_title = title_case(grouping.y_field().unwrap_or("count"));

        // Bars hold integers; shift so the smallest median is never negative
        let floor = bars.iter().map(|bar| bar.median).fold(0.0_f64, f64::min);
        let chart_bars: Vec<Bar> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let mut chart_bar = Bar::default()
                    .label(Line::from(bar.label.clone()))
                    .value(((bar.median - floor) * 1000.0).round() as u64)
                    .text_value(format!("{:.2}", bar.median));
                if request.multiple_colors {
                    let color = theme::chart::SERIES[i % theme::chart::SERIES.len()];
                    chart_bar = chart_bar.style(Style::default().fg(color));
                }
                chart_bar
            })
            .collect();

        let count = bars.len() as u16;
        let inner = self.width.saturating_sub(2);
        let bar_width = ((inner + 1) / count.max(1))
            .saturating_sub(1)
            .clamp(1, MAX_BAR_WIDTH);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Impact of {} on {} ", x_title, y_title));
        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&chart_bars))
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(theme::chart::BAR))
            .value_style(theme::chart::MEDIAN_VALUE)
            .label_style(theme::chart::LABEL);

        let area = Rect::new(0, 0, self.width, CHART_HEIGHT);
        let mut buffer = Buffer::empty(area);
        chart.render(area, &mut buffer);

        let mut legend: Vec<String> = bars
            .iter()
            .map(|bar| {
                format!(
                    "{} = {}: N={}, median={:.2}",
                    x_title, bar.label, bar.count, bar.median
                )
            })
            .collect();
        if let Some(line) = best_fit_line(grouping) {
            legend.push(line);
        }

        Some(Drawing { buffer, legend })
    }
}

fn best_fit_line(grouping: &Grouping) -> Option<String> {
    let groups: Vec<_> = grouping.valid_groups().collect();
    if groups.len() < 2 || !groups.iter().all(|group| group.key.is_number()) {
        return None;
    }
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for group in groups {
        let x = group.key.as_f64()?;
        for y in group.values.iter().filter_map(as_number) {
            xs.push(x);
            ys.push(y);
        }
    }
    let fit = linear_regression(&xs, &ys)?;
    Some(format!(
        "Best fit line: slope={:.3}, R²={:.3}",
        fit.slope,
        fit.r_squared()
    ))
}

/// Rows of the buffer as plain text, trailing blanks removed
fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Rows of the buffer with each cell's style as ANSI escapes
fn buffer_lines_styled(buffer: &Buffer) -> Vec<String> {
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| Span::styled(cell.symbol().to_string(), cell.style()))
                .collect();
            paint_spans(&spans)
        })
        .collect()
}

impl<W: Write> ChartRenderer for TextChartRenderer<W> {
    fn render(&mut self, request: &ChartRequest<'_>) -> Result<Option<PathBuf>, JlensError> {
        let Some(drawing) = self.draw(request) else {
            log::debug!("No groups to chart for '{}'", request.grouping.field());
            return Ok(None);
        };

        let mut text = buffer_lines(&drawing.buffer).join("\n");
        text.push('\n');
        for line in &drawing.legend {
            text.push_str(line);
            text.push('\n');
        }

        let path = request.output.clone();
        let write = |path: &Path| -> std::io::Result<()> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &text)
        };
        write(&path).map_err(|source| JlensError::Chart {
            path: path.clone(),
            source,
        })?;
        log::debug!("Chart saved to {:?}", path);

        if request.show {
            let rows = if self.color {
                buffer_lines_styled(&drawing.buffer)
            } else {
                buffer_lines(&drawing.buffer)
            };
            for row in rows.iter().chain(&drawing.legend) {
                writeln!(self.out, "{}", row)?;
            }
            self.out.flush()?;
        }

        Ok(Some(path))
    }
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod chart_tests;
