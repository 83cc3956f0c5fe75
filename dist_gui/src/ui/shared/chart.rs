//! Canvas drawing for the probability bar chart
//!
//! Renders a `ChartData` series: bars, value labels, the distribution curve,
//! the scaled normal reference curve and the dotted mean marker.
//!
//! Geometry is kept in a `canvas::Cache`. `ChartView::set` and
//! `ChartView::clear` drop the cached geometry before the data changes, so a
//! recalculation never draws on top of the previous chart.

use iced::widget::canvas::{self, Canvas, Frame, Geometry, LineDash, Path, Stroke, Text};
use iced::widget::{container, text};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use dist_core::chart::{ChartData, X_AXIS_LABEL, Y_AXIS_LABEL};
use dist_core::format::format_fixed;

use crate::Message;

const CHART_HEIGHT: f32 = 380.0;
const MARGIN_LEFT: f32 = 56.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 48.0;
const MARGIN_BOTTOM: f32 = 42.0;
const Y_TICKS: usize = 5;
const MAX_X_TICKS: u64 = 20;

/// Chart state owned by the application: the series and its geometry cache
pub struct ChartView {
    data: Option<ChartData>,
    cache: canvas::Cache,
}

impl ChartView {
    pub fn new() -> Self {
        Self {
            data: None,
            cache: canvas::Cache::new(),
        }
    }

    /// Replace the series; the old geometry is discarded first
    pub fn set(&mut self, data: ChartData) {
        self.cache.clear();
        self.data = Some(data);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.data = None;
    }

    /// Force a redraw with the same data (e.g. after a theme change)
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn data(&self) -> Option<&ChartData> {
        self.data.as_ref()
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.data {
            Some(data) => Canvas::new(ProbabilityChart {
                data,
                cache: &self.cache,
            })
            .width(Length::Fill)
            .height(Length::Fixed(CHART_HEIGHT))
            .into(),
            None => container(
                text("El gráfico aparecerá después de calcular")
                    .size(11)
                    .color([0.5, 0.5, 0.5]),
            )
            .width(Length::Fill)
            .height(Length::Fixed(80.0))
            .align_x(iced::alignment::Horizontal::Center)
            .align_y(iced::alignment::Vertical::Center)
            .into(),
        }
    }
}

/// Maps data coordinates to frame pixels
struct PlotArea {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    x_min: f64,
    x_span: f64,
    y_max: f64,
}

impl PlotArea {
    fn new(bounds: Size, data: &ChartData) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (bounds.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (bounds.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            x_min: data.x_min,
            x_span: (data.x_max - data.x_min).max(1e-9),
            y_max: data.y_max(),
        }
    }

    fn bottom(&self) -> f32 {
        self.top + self.height
    }

    fn px(&self, x: f64) -> f32 {
        self.left + ((x - self.x_min) / self.x_span) as f32 * self.width
    }

    fn py(&self, y: f64) -> f32 {
        self.bottom() - (y / self.y_max) as f32 * self.height
    }

    fn point(&self, x: f64, y: f64) -> Point {
        Point::new(self.px(x), self.py(y))
    }
}

struct ProbabilityChart<'a> {
    data: &'a ChartData,
    cache: &'a canvas::Cache,
}

impl ProbabilityChart<'_> {
    fn draw_axes(&self, frame: &mut Frame, area: &PlotArea, color: Color) {
        let axis_color = Color { a: 0.6, ..color };
        let grid_color = Color { a: 0.12, ..color };

        let axes = Path::new(|builder| {
            builder.move_to(Point::new(area.left, area.top));
            builder.line_to(Point::new(area.left, area.bottom()));
            builder.line_to(Point::new(area.left + area.width, area.bottom()));
        });
        frame.stroke(&axes, Stroke::default().with_color(axis_color).with_width(1.0));

        // Horizontal grid and y tick labels
        for i in 0..=Y_TICKS {
            let value = self.data.y_max() * i as f64 / Y_TICKS as f64;
            let y = area.py(value);
            if i > 0 {
                let grid = Path::line(Point::new(area.left, y), Point::new(area.left + area.width, y));
                frame.stroke(&grid, Stroke::default().with_color(grid_color).with_width(1.0));
            }
            frame.fill_text(Text {
                content: format_fixed(value, 3),
                position: Point::new(area.left - 40.0, y - 5.0),
                color: axis_color,
                size: iced::Pixels(9.0),
                ..Text::default()
            });
        }

        // Integer x ticks, thinned out for wide ranges
        let first = self.data.x_min.ceil().max(0.0) as u64;
        let last = self.data.x_max.floor().max(0.0) as u64;
        let step = ((last.saturating_sub(first)) / MAX_X_TICKS).max(1);
        let mut k = first;
        while k <= last {
            let x = area.px(k as f64);
            let tick = Path::line(Point::new(x, area.bottom()), Point::new(x, area.bottom() + 4.0));
            frame.stroke(&tick, Stroke::default().with_color(axis_color).with_width(1.0));
            frame.fill_text(Text {
                content: k.to_string(),
                position: Point::new(x, area.bottom() + 6.0),
                color: axis_color,
                size: iced::Pixels(9.0),
                align_x: iced::alignment::Horizontal::Center.into(),
                ..Text::default()
            });
            k += step;
        }

        frame.fill_text(Text {
            content: X_AXIS_LABEL.to_string(),
            position: Point::new(area.left + area.width / 2.0, area.bottom() + 22.0),
            color,
            size: iced::Pixels(11.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: Y_AXIS_LABEL.to_string(),
            position: Point::new(4.0, area.top - 16.0),
            color,
            size: iced::Pixels(11.0),
            ..Text::default()
        });
    }

    fn draw_title(&self, frame: &mut Frame, width: f32, color: Color) {
        frame.fill_text(Text {
            content: self.data.title.clone(),
            position: Point::new(width / 2.0, 4.0),
            color,
            size: iced::Pixels(13.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });
        frame.fill_text(Text {
            content: self.data.subtitle.clone(),
            position: Point::new(width / 2.0, 20.0),
            color: Color { a: 0.7, ..color },
            size: iced::Pixels(11.0),
            align_x: iced::alignment::Horizontal::Center.into(),
            ..Text::default()
        });
    }

    fn draw_bars(&self, frame: &mut Frame, area: &PlotArea, bar_color: Color, highlight_color: Color, label_color: Color) {
        let bar_px = (self.data.bar_width / area.x_span) as f32 * area.width;

        for bar in &self.data.bars {
            let x = area.px(bar.x as f64);
            let top = area.py(bar.probability);
            let rect = Path::rectangle(
                Point::new(x - bar_px / 2.0, top),
                Size::new(bar_px, (area.bottom() - top).max(0.0)),
            );

            let fill = if bar.highlighted {
                Color { a: 0.9, ..highlight_color }
            } else {
                Color { a: 0.75, ..bar_color }
            };
            frame.fill(&rect, fill);
            frame.stroke(&rect, Stroke::default().with_color(Color { a: 0.9, ..label_color }).with_width(0.5));

            if bar.highlighted {
                frame.fill_text(Text {
                    content: format!("P(X={})={}", bar.x, format_fixed(bar.probability, 4)),
                    position: Point::new(x, top - 16.0),
                    color: highlight_color,
                    size: iced::Pixels(11.0),
                    align_x: iced::alignment::Horizontal::Center.into(),
                    ..Text::default()
                });
            } else if bar.show_label {
                frame.fill_text(Text {
                    content: format_fixed(bar.probability, 4),
                    position: Point::new(x, top - 12.0),
                    color: label_color,
                    size: iced::Pixels(8.0),
                    align_x: iced::alignment::Horizontal::Center.into(),
                    ..Text::default()
                });
            }
        }
    }

    fn draw_polyline(frame: &mut Frame, area: &PlotArea, points: &[(f64, f64)], stroke: Stroke<'_>) {
        let Some(&(x0, y0)) = points.first() else {
            return;
        };
        let path = Path::new(|builder| {
            builder.move_to(area.point(x0, y0));
            for &(x, y) in &points[1..] {
                builder.line_to(area.point(x, y));
            }
        });
        frame.stroke(&path, stroke);
    }

    fn draw_mean(&self, frame: &mut Frame, area: &PlotArea, color: Color) {
        let x = area.px(self.data.mean);
        if x < area.left || x > area.left + area.width {
            return;
        }
        let line = Path::line(Point::new(x, area.top), Point::new(x, area.bottom()));
        frame.stroke(
            &line,
            Stroke {
                line_dash: LineDash {
                    segments: &[2.0, 4.0],
                    offset: 0,
                },
                ..Stroke::default().with_color(color).with_width(1.5)
            },
        );
        frame.fill_text(Text {
            content: self.data.mean_label(),
            position: Point::new(x + 4.0, area.top),
            color,
            size: iced::Pixels(10.0),
            ..Text::default()
        });
    }
}

impl canvas::Program<Message> for ProbabilityChart<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<Geometry> {
        let palette = theme.palette();

        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let area = PlotArea::new(bounds.size(), self.data);

            self.draw_title(frame, bounds.width, palette.text);
            self.draw_axes(frame, &area, palette.text);
            self.draw_bars(frame, &area, palette.primary, palette.danger, palette.text);

            // Distribution curve through the bar tops
            Self::draw_polyline(
                frame,
                &area,
                &self.data.curve,
                Stroke::default().with_color(Color { a: 0.8, ..palette.primary }).with_width(2.0),
            );

            // Normal reference, clipped to the visible range
            let normal: Vec<(f64, f64)> = self
                .data
                .normal_curve
                .iter()
                .copied()
                .filter(|(x, _)| *x >= self.data.x_min && *x <= self.data.x_max)
                .collect();
            Self::draw_polyline(
                frame,
                &area,
                &normal,
                Stroke {
                    line_dash: LineDash {
                        segments: &[6.0, 4.0],
                        offset: 0,
                    },
                    ..Stroke::default().with_color(palette.success).with_width(1.5)
                },
            );

            self.draw_mean(frame, &area, palette.danger);
        });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dist_core::calculations::binomial::{calculate, BinomialInput, BinomialParameters};

    fn sample_chart() -> ChartData {
        let result = calculate(&BinomialInput::full(BinomialParameters::new(10, 0.5))).unwrap();
        ChartData::binomial(&result)
    }

    #[test]
    fn test_plot_area_mapping() {
        let data = sample_chart();
        let area = PlotArea::new(Size::new(572.0, 380.0), &data);

        assert_eq!(area.width, 500.0);
        assert!((area.px(data.x_min) - MARGIN_LEFT).abs() < 1e-4);
        assert!((area.px(data.x_max) - (MARGIN_LEFT + 500.0)).abs() < 1e-3);
        assert!((area.py(0.0) - area.bottom()).abs() < 1e-4);
        assert!((area.py(data.y_max()) - MARGIN_TOP).abs() < 1e-3);
    }

    #[test]
    fn test_set_and_clear() {
        let mut chart = ChartView::new();
        assert!(chart.data().is_none());

        chart.set(sample_chart());
        assert_eq!(chart.data().map(|d| d.bars.len()), Some(11));

        chart.set(sample_chart());
        assert_eq!(chart.data().map(|d| d.bars.len()), Some(11));

        chart.clear();
        assert!(chart.data().is_none());
    }
}
