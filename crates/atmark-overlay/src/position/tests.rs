//! Tests for overlay positioning

use std::collections::HashMap;

use pretty_assertions::assert_eq;

use atmark_core::TextRange;

use super::*;

/// Geometry stub backed by a map of offset -> rect.
#[derive(Default)]
struct MapGeometry(HashMap<usize, CaretRect>);

impl MapGeometry {
    fn with(mut self, offset: usize, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        self.0.insert(
            offset,
            CaretRect {
                left,
                top,
                right,
                bottom,
            },
        );
        self
    }
}

impl SelectionGeometry for MapGeometry {
    fn caret_rect(&self, offset: usize) -> Option<CaretRect> {
        self.0.get(&offset).copied()
    }
}

fn viewport() -> Viewport {
    Viewport {
        width: 1024.0,
        height: Some(768.0),
        scroll_x: 0.0,
        scroll_y: 0.0,
    }
}

fn panel() -> PanelSize {
    PanelSize::new(300.0, 200.0)
}

mod precondition_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_inactive_overlay_is_hidden() {
        let geometry = MapGeometry::default().with(0, 10.0, 10.0, 12.0, 20.0);
        let position = compute_position(
            false,
            TextRange::new(0, 0),
            &geometry,
            panel(),
            &viewport(),
            DeviceClass::Pointer,
        );
        assert_eq!(position, Position::HIDDEN);
        assert!(!position.visible);
    }

    #[test]
    fn test_zero_panel_width_is_hidden() {
        let geometry = MapGeometry::default().with(0, 10.0, 10.0, 12.0, 20.0);
        let position = compute_position(
            true,
            TextRange::new(0, 0),
            &geometry,
            PanelSize::new(0.0, 200.0),
            &viewport(),
            DeviceClass::Pointer,
        );
        assert_eq!(position, Position::HIDDEN);
    }

    #[test]
    fn test_zero_panel_height_is_hidden() {
        let geometry = MapGeometry::default().with(0, 10.0, 10.0, 12.0, 20.0);
        let position = compute_position(
            true,
            TextRange::new(0, 0),
            &geometry,
            PanelSize::new(300.0, 0.0),
            &viewport(),
            DeviceClass::Pointer,
        );
        assert_eq!(position, Position::HIDDEN);
    }

    #[test]
    fn test_missing_geometry_is_hidden_not_an_error() {
        // Only the start offset is measurable.
        let geometry = MapGeometry::default().with(5, 40.0, 10.0, 42.0, 26.0);
        let position = compute_position(
            true,
            TextRange::new(5, 9),
            &geometry,
            panel(),
            &viewport(),
            DeviceClass::Pointer,
        );
        assert_eq!(position, Position::HIDDEN);
    }
}

mod touch_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_touch_pins_to_viewport_bottom_ignoring_geometry() {
        // No geometry at all: the touch branch never queries it.
        let geometry = MapGeometry::default();
        let position = compute_position(
            true,
            TextRange::new(5, 9),
            &geometry,
            panel(),
            &viewport(),
            DeviceClass::Touch,
        );
        assert!(position.visible);
        assert_eq!(position.left, 0.0);
        assert_eq!(position.top, 768.0);
        assert_eq!(position.offset, 0.0);
    }

    #[test]
    fn test_touch_without_viewport_height_falls_through_to_geometry() {
        let geometry = MapGeometry::default()
            .with(5, 40.0, 10.0, 42.0, 26.0)
            .with(9, 90.0, 10.0, 92.0, 26.0);
        let no_height = Viewport {
            height: None,
            ..viewport()
        };
        let position = compute_position(
            true,
            TextRange::new(5, 9),
            &geometry,
            panel(),
            &no_height,
            DeviceClass::Touch,
        );
        assert!(position.visible);
        assert_eq!(position.left, 40.0);
    }
}

mod pointer_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_panel_sits_below_match_start() {
        let geometry = MapGeometry::default()
            .with(5, 40.0, 10.0, 42.0, 26.0)
            .with(9, 90.0, 10.0, 92.0, 26.0);
        let position = compute_position(
            true,
            TextRange::new(5, 9),
            &geometry,
            panel(),
            &viewport(),
            DeviceClass::Pointer,
        );
        assert!(position.visible);
        // Start-aligned, not centered over the selection.
        assert_eq!(position.left, 40.0);
        assert_eq!(position.top, 31.0);
        assert_eq!(position.offset, 190.0);
    }

    #[test]
    fn test_reversed_rects_are_normalized() {
        // "from" renders visually after "to" (bidi): bounds still use the
        // leftmost edge and lowest bottom.
        let geometry = MapGeometry::default()
            .with(5, 90.0, 10.0, 92.0, 26.0)
            .with(9, 40.0, 12.0, 42.0, 30.0);
        let position = compute_position(
            true,
            TextRange::new(5, 9),
            &geometry,
            panel(),
            &viewport(),
            DeviceClass::Pointer,
        );
        assert_eq!(position.left, 40.0);
        assert_eq!(position.top, 35.0);
    }

    #[test]
    fn test_left_edge_clamped_to_margin() {
        let geometry = MapGeometry::default()
            .with(0, 1.0, 10.0, 2.0, 26.0)
            .with(3, 20.0, 10.0, 21.0, 26.0);
        let position = compute_position(
            true,
            TextRange::new(0, 3),
            &geometry,
            panel(),
            &viewport(),
            DeviceClass::Pointer,
        );
        assert_eq!(position.left, MARGIN);
        // The indicator offset is computed from the clamped anchor.
        assert_eq!(position.offset, MARGIN + 150.0);
    }

    #[test]
    fn test_scroll_offsets_convert_to_page_coordinates() {
        let geometry = MapGeometry::default()
            .with(5, 40.0, 10.0, 42.0, 26.0)
            .with(9, 90.0, 10.0, 92.0, 26.0);
        let scrolled = Viewport {
            scroll_x: 100.0,
            scroll_y: 400.0,
            ..viewport()
        };
        let position = compute_position(
            true,
            TextRange::new(5, 9),
            &geometry,
            panel(),
            &scrolled,
            DeviceClass::Pointer,
        );
        assert_eq!(position.left, 140.0);
        assert_eq!(position.top, 431.0);
        // Indicator offset stays viewport-relative, unscrolled.
        assert_eq!(position.offset, 190.0);
    }
}
