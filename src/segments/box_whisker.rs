use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::geometry::{distance_to_line_segment, rect_centered, rect_contains};
use crate::core::{BoxPlotStatistics, SeriesRanges};
use crate::render::{CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame};
use crate::segments::column::{RectEdges, layout_rect};
use crate::segments::{ChartSegment, SegmentState};
use crate::series::CartesianSeries;

/// Minimum pointer tolerance around whisker lines, in pixels.
const WHISKER_HIT_TOLERANCE: f64 = 10.0;
const DEFAULT_OUTLIER_SIZE: f64 = 8.0;

/// Result of a box-and-whisker hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxPlotHit {
    pub index: usize,
    /// Position of the touched outlier within the segment's outlier list.
    pub outlier: Option<usize>,
}

/// Screen-space statistic lines of one box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiskerLines {
    pub median: (Point, Point),
    pub upper_whisker: (Point, Point),
    pub lower_whisker: (Point, Point),
    pub maximum_cap: (Point, Point),
    pub minimum_cap: (Point, Point),
}

impl WhiskerLines {
    /// The four lines that make up the whiskers, median excluded.
    fn whiskers(&self) -> [(Point, Point); 4] {
        [
            self.upper_whisker,
            self.lower_whisker,
            self.maximum_cap,
            self.minimum_cap,
        ]
    }
}

/// One category of a box-and-whisker series.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxWhiskerSegment {
    state: SegmentState,
    x1: f64,
    x2: f64,
    center: f64,
    statistics: Option<BoxPlotStatistics>,
    previous_quartiles: (f64, f64),
    show_mean: bool,
    outlier_size: f64,
    edges: RectEdges,
    lines: Option<WhiskerLines>,
    mean_position: Option<Point>,
    outlier_rects: SmallVec<[Rect; 4]>,
}

impl BoxWhiskerSegment {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            state: SegmentState::new(index),
            x1: f64::NAN,
            x2: f64::NAN,
            center: f64::NAN,
            statistics: None,
            previous_quartiles: (f64::NAN, f64::NAN),
            show_mean: false,
            outlier_size: DEFAULT_OUTLIER_SIZE,
            edges: RectEdges::nan(),
            lines: None,
            mean_position: None,
            outlier_rects: SmallVec::new(),
        }
    }

    /// Stores the category span and its summary; `None` marks the segment
    /// empty.
    pub fn set_data(
        &mut self,
        x1: f64,
        x2: f64,
        statistics: Option<BoxPlotStatistics>,
        ranges: &mut SeriesRanges,
    ) {
        self.x1 = x1;
        self.x2 = x2;
        self.center = x1 + (x2 - x1) / 2.0;
        self.state
            .set_empty(statistics.is_none() || x1.is_nan() || x2.is_nan());
        ranges.extend_x(x1);
        ranges.extend_x(x2);
        if let Some(stats) = &statistics {
            ranges.extend_y(stats.minimum);
            ranges.extend_y(stats.maximum);
            for outlier in &stats.outliers {
                ranges.extend_y(*outlier);
            }
        }
        self.statistics = statistics;
    }

    pub fn snapshot_previous(&mut self) {
        if let Some(stats) = &self.statistics {
            self.previous_quartiles = (stats.upper_quartile, stats.lower_quartile);
        }
    }

    pub fn set_show_mean(&mut self, show_mean: bool) {
        self.show_mean = show_mean;
    }

    /// Side length of outlier markers; non-positive sizes keep the default.
    pub fn set_outlier_size(&mut self, outlier_size: f64) {
        if outlier_size.is_finite() && outlier_size > 0.0 {
            self.outlier_size = outlier_size;
        }
    }

    pub fn on_layout(&mut self, series: &CartesianSeries<'_>) {
        let Some(stats) = self.statistics.clone().filter(|_| !self.state.is_empty()) else {
            self.reset_geometry();
            return;
        };

        let laid_out = layout_rect(
            series,
            self.x1,
            stats.upper_quartile,
            self.x2,
            stats.lower_quartile,
            self.previous_quartiles,
        );
        let Some(edges) = laid_out else {
            trace!(index = self.state.index(), "box plot outside visible range");
            self.reset_geometry();
            return;
        };
        self.edges = edges;
        self.state.set_bounds(edges.to_rect());

        // Statistic lines grow out of the box midline while animating.
        let midline = series.point(
            self.center,
            stats.lower_quartile + (stats.upper_quartile - stats.lower_quartile) / 2.0,
        );
        let t = if series.animation.can_animate() {
            series.animation.value()
        } else {
            1.0
        };
        let at = |x: f64, y: f64| midline.lerp(series.point(x, y), t);

        let cap_half_width = (self.x2 - self.x1) / 4.0;
        self.lines = Some(WhiskerLines {
            median: (at(self.x1, stats.median), at(self.x2, stats.median)),
            upper_whisker: (
                at(self.center, stats.upper_quartile),
                at(self.center, stats.maximum),
            ),
            lower_whisker: (
                at(self.center, stats.lower_quartile),
                at(self.center, stats.minimum),
            ),
            maximum_cap: (
                at(self.center - cap_half_width, stats.maximum),
                at(self.center + cap_half_width, stats.maximum),
            ),
            minimum_cap: (
                at(self.center - cap_half_width, stats.minimum),
                at(self.center + cap_half_width, stats.minimum),
            ),
        });
        self.mean_position = self.show_mean.then(|| at(self.center, stats.mean));

        if !series.animation.can_animate() {
            self.outlier_rects = stats
                .outliers
                .iter()
                .map(|value| {
                    rect_centered(
                        series.point(self.center, *value),
                        self.outlier_size,
                        self.outlier_size,
                    )
                })
                .collect();
        }
    }

    fn reset_geometry(&mut self) {
        self.edges = RectEdges::nan();
        self.state.clear_bounds();
        self.lines = None;
        self.mean_position = None;
        self.outlier_rects.clear();
    }

    #[must_use]
    pub fn edges(&self) -> RectEdges {
        self.edges
    }

    #[must_use]
    pub fn lines(&self) -> Option<&WhiskerLines> {
        self.lines.as_ref()
    }

    #[must_use]
    pub fn outlier_rects(&self) -> &[Rect] {
        &self.outlier_rects
    }

    #[must_use]
    pub fn mean_position(&self) -> Option<Point> {
        self.mean_position
    }

    /// Hit test that also reports which outlier marker was touched.
    ///
    /// The box, a whisker line within `max(stroke_width, 10px)` and any
    /// outlier marker all count as a hit.
    #[must_use]
    pub fn hit_detail(&self, x: f64, y: f64) -> Option<BoxPlotHit> {
        if !self.state.is_drawable() {
            return None;
        }
        let point = Point::new(x, y);
        let index = self.state.index();

        if let Some(outlier) = self
            .outlier_rects
            .iter()
            .position(|rect| rect_contains(*rect, point))
        {
            return Some(BoxPlotHit {
                index,
                outlier: Some(outlier),
            });
        }

        if rect_contains(self.state.bounds(), point) {
            return Some(BoxPlotHit {
                index,
                outlier: None,
            });
        }

        let tolerance = self.state.style().stroke_width.max(WHISKER_HIT_TOLERANCE);
        let near_whisker = self.lines.is_some_and(|lines| {
            lines
                .whiskers()
                .iter()
                .any(|(start, end)| distance_to_line_segment(*start, *end, point) <= tolerance)
        });
        near_whisker.then_some(BoxPlotHit {
            index,
            outlier: None,
        })
    }
}

impl ChartSegment for BoxWhiskerSegment {
    fn state(&self) -> &SegmentState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SegmentState {
        &mut self.state
    }

    fn draw(&self, frame: &mut RenderFrame) {
        let Some(lines) = self.lines.filter(|_| self.state.is_drawable()) else {
            return;
        };
        let style = self.state.style();
        let line_paint = style.line_paint();

        for (start, end) in lines.whiskers() {
            frame.push_line(LinePrimitive::new(start, end, line_paint.clone()));
        }
        frame.push_rect(RectPrimitive::new(self.edges.to_rect(), style.paint()));
        frame.push_line(LinePrimitive::new(
            lines.median.0,
            lines.median.1,
            line_paint.clone(),
        ));

        if let Some(mean) = self.mean_position {
            let half = self.outlier_size / 2.0;
            frame.push_line(LinePrimitive::new(
                Point::new(mean.x - half, mean.y - half),
                Point::new(mean.x + half, mean.y + half),
                line_paint.clone(),
            ));
            frame.push_line(LinePrimitive::new(
                Point::new(mean.x - half, mean.y + half),
                Point::new(mean.x + half, mean.y - half),
                line_paint,
            ));
        }

        for rect in &self.outlier_rects {
            frame.push_circle(CirclePrimitive::new(
                rect.center(),
                rect.width() / 2.0,
                style.paint(),
            ));
        }
    }

    fn data_point_index(&self, x: f64, y: f64) -> Option<usize> {
        self.hit_detail(x, y).map(|hit| hit.index)
    }

    fn label_anchor(&self) -> Option<Point> {
        self.lines.map(|lines| lines.median.0.midpoint(lines.median.1))
    }
}
