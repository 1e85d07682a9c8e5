//! Types shared between the upload widget and the solver endpoint
//!
//! The solver is a separate HTTP service; these types mirror its JSON
//! response shape (PascalCase field names, integer cell-source tags).
//! The overlay geometry lives here too so the corner mapping can be
//! unit-tested off the wasm target.

use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Types
// ============================================================================

/// Number of cells in a standard 9x9 puzzle, row-major.
pub const GRID_CELLS: usize = 81;

/// Where a cell's digit came from. `Parsed` digits were printed in the
/// uploaded photo; `Solved` digits were inferred by the solver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellSource {
    Parsed,
    Solved,
}

impl TryFrom<u8> for CellSource {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Parsed),
            1 => Ok(Self::Solved),
            other => Err(format!("unknown cell source tag: {other}")),
        }
    }
}

impl From<CellSource> for u8 {
    fn from(source: CellSource) -> Self {
        match source {
            CellSource::Parsed => 0,
            CellSource::Solved => 1,
        }
    }
}

/// One cell of the solved grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub value: String,
    pub source: CellSource,
}

/// A coordinate in the original image's pixel space (or, after mapping,
/// in display space).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Solver response for one submitted image.
///
/// `points`, when present, holds the detected puzzle corners ordered
/// top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SolutionResponse {
    pub success: bool,
    #[serde(default)]
    pub values: Vec<Cell>,
    #[serde(default)]
    pub points: Option<Vec<Point>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Plain-text rendering of the solved board, kept for logging.
    #[serde(default)]
    pub body: Option<String>,
}

impl SolutionResponse {
    /// The 81 cells of the grid, row-major. `None` when the server sent a
    /// short or oversized list.
    pub fn cells(&self) -> Option<&[Cell]> {
        if self.values.len() == GRID_CELLS {
            Some(self.values.as_slice())
        } else {
            None
        }
    }

    /// The four detected puzzle corners. `None` unless exactly four points
    /// were reported.
    pub fn corners(&self) -> Option<[Point; 4]> {
        let points = self.points.as_deref()?;
        match points {
            [a, b, c, d] => Some([*a, *b, *c, *d]),
            _ => None,
        }
    }

    /// Human-readable failure text: `error`, falling back to `title`,
    /// falling back to a generic message.
    pub fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.title.as_deref())
            .unwrap_or("The puzzle could not be solved.")
            .to_string()
    }
}

// ============================================================================
// Overlay Geometry
// ============================================================================

pub mod geometry {
    //! Maps solver-reported corners from source-image pixel space into the
    //! rendered (possibly scaled) image's display space.

    use super::Point;

    /// Handle names in corner order, as the transform-handle widget
    /// expects them.
    pub const CORNER_NAMES: [&str; 4] = ["topLeft", "topRight", "bottomRight", "bottomLeft"];

    /// A width/height pair in pixels.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Size {
        pub width: f64,
        pub height: f64,
    }

    impl Size {
        pub fn new(width: f64, height: f64) -> Self {
            Self { width, height }
        }

        /// Both dimensions strictly positive and finite. An unloaded image
        /// or an unlaid-out container measures zero.
        pub fn is_measurable(&self) -> bool {
            self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
        }
    }

    /// Scales each corner independently per axis:
    /// `display = source / natural * display_container`.
    ///
    /// Returns `None` when either size is not measurable; the caller must
    /// leave prior handle positions unchanged in that case.
    pub fn map_corners_to_display(
        corners: &[Point; 4],
        natural: Size,
        display: Size,
    ) -> Option<[Point; 4]> {
        if !natural.is_measurable() || !display.is_measurable() {
            return None;
        }
        Some(corners.map(|corner| Point {
            x: corner.x / natural.width * display.width,
            y: corner.y / natural.height * display.height,
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::geometry::{map_corners_to_display, Size, CORNER_NAMES};
    use super::*;

    fn solved_cells(solved: usize) -> Vec<Cell> {
        (0..GRID_CELLS)
            .map(|i| Cell {
                value: ((i % 9) + 1).to_string(),
                source: if i < solved {
                    CellSource::Solved
                } else {
                    CellSource::Parsed
                },
            })
            .collect()
    }

    fn sample_corners() -> [Point; 4] {
        [
            Point { x: 40.0, y: 60.0 },
            Point { x: 900.0, y: 55.0 },
            Point { x: 910.0, y: 920.0 },
            Point { x: 35.0, y: 930.0 },
        ]
    }

    #[test]
    fn deserializes_pascal_case_response() {
        let json = r#"{
            "Success": true,
            "Values": [{"value": "5", "source": 1}],
            "Points": [
                {"x": 10.0, "y": 20.0},
                {"x": 300.0, "y": 22.0},
                {"x": 305.0, "y": 310.0},
                {"x": 8.0, "y": 312.0}
            ],
            "Body": "5 3 4 ..."
        }"#;

        let response: SolutionResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.values.len(), 1);
        assert_eq!(response.values[0].source, CellSource::Solved);
        assert_eq!(response.corners().unwrap()[2], Point { x: 305.0, y: 310.0 });
        assert_eq!(response.body.as_deref(), Some("5 3 4 ..."));
    }

    #[test]
    fn cell_source_round_trips_as_integer_tag() {
        let cell = Cell {
            value: "7".to_string(),
            source: CellSource::Parsed,
        };
        let json = serde_json::to_string(&cell).unwrap();
        assert!(json.contains("\"source\":0"));

        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);

        assert!(serde_json::from_str::<Cell>(r#"{"value":"7","source":2}"#).is_err());
    }

    #[test]
    fn cells_accessor_requires_exactly_81_values() {
        let mut response = SolutionResponse {
            success: true,
            values: solved_cells(30),
            points: None,
            error: None,
            title: None,
            body: None,
        };
        assert_eq!(response.cells().unwrap().len(), GRID_CELLS);

        response.values.pop();
        assert!(response.cells().is_none());
    }

    #[test]
    fn corners_accessor_requires_exactly_four_points() {
        let mut response = SolutionResponse {
            success: true,
            values: Vec::new(),
            points: Some(sample_corners().to_vec()),
            error: None,
            title: None,
            body: None,
        };
        assert!(response.corners().is_some());

        response.points.as_mut().unwrap().pop();
        assert!(response.corners().is_none());

        response.points = None;
        assert!(response.corners().is_none());
    }

    #[test]
    fn failure_message_prefers_error_then_title() {
        let mut response = SolutionResponse {
            success: false,
            values: Vec::new(),
            points: None,
            error: Some("could not parse image".to_string()),
            title: Some("Not Solved".to_string()),
            body: None,
        };
        assert_eq!(response.failure_message(), "could not parse image");

        response.error = None;
        assert_eq!(response.failure_message(), "Not Solved");

        response.title = None;
        assert_eq!(response.failure_message(), "The puzzle could not be solved.");

        // The server marshals the zero value as an empty string, not null.
        response.error = Some(String::new());
        response.title = Some("Error".to_string());
        assert_eq!(response.failure_message(), "Error");
    }

    #[test]
    fn corner_mapping_is_linear_and_order_preserving() {
        let corners = sample_corners();
        let natural = Size::new(1000.0, 1000.0);
        let display = Size::new(500.0, 250.0);

        let mapped = map_corners_to_display(&corners, natural, display).unwrap();
        for (source, display_point) in corners.iter().zip(mapped.iter()) {
            assert!((display_point.x / display.width - source.x / natural.width).abs() < 1e-9);
            assert!((display_point.y / display.height - source.y / natural.height).abs() < 1e-9);
        }

        // Order is preserved: top-left stays left of top-right, and so on.
        assert!(mapped[0].x < mapped[1].x);
        assert!(mapped[0].y < mapped[3].y);
    }

    #[test]
    fn corner_mapping_at_unit_scale_is_identity() {
        let corners = sample_corners();
        let size = Size::new(1000.0, 1000.0);
        let mapped = map_corners_to_display(&corners, size, size).unwrap();
        assert_eq!(mapped, corners);
    }

    #[test]
    fn corner_mapping_refuses_unmeasured_dimensions() {
        let corners = sample_corners();
        let good = Size::new(800.0, 600.0);

        assert!(map_corners_to_display(&corners, Size::new(0.0, 600.0), good).is_none());
        assert!(map_corners_to_display(&corners, good, Size::new(640.0, 0.0)).is_none());
        assert!(map_corners_to_display(&corners, Size::new(f64::NAN, 600.0), good).is_none());
        assert!(map_corners_to_display(&corners, good, good).is_some());
    }

    #[test]
    fn corner_names_match_widget_contract() {
        assert_eq!(
            CORNER_NAMES,
            ["topLeft", "topRight", "bottomRight", "bottomLeft"]
        );
    }
}
