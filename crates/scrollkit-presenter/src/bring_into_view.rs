#![forbid(unsafe_code)]

//! Bring-into-view target computation.
//!
//! A request names an element and a rectangle in the element's space. The
//! host resolves element bounds through an [`ElementLocator`]; the bounds
//! are looked up again at dispatch time because the element may have moved
//! while the request was queued.

use scrollkit_core::geometry::{Point, Rect, Size, Vector2};

use crate::options::ViewChangeOptions;

/// Host-assigned element identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Resolves element bounds in unzoomed content space.
pub trait ElementLocator {
    fn element_bounds(&self, element: ElementId) -> Option<Rect>;
}

/// Caller request.
#[derive(Debug, Clone, PartialEq)]
pub struct BringIntoViewRequest {
    pub element: ElementId,
    /// Area of the element to reveal, relative to the element. `None`
    /// reveals the whole element.
    pub target_rect: Option<Rect>,
    /// `0` aligns with the near edge, `1` with the far edge. `None` scrolls
    /// the minimum distance.
    pub horizontal_alignment_ratio: Option<f64>,
    pub vertical_alignment_ratio: Option<f64>,
    /// Extra offset applied after alignment.
    pub horizontal_offset: f64,
    pub vertical_offset: f64,
    pub options: ViewChangeOptions,
}

impl BringIntoViewRequest {
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            target_rect: None,
            horizontal_alignment_ratio: None,
            vertical_alignment_ratio: None,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            options: ViewChangeOptions::default(),
        }
    }

    #[must_use]
    pub fn aligned(mut self, horizontal: Option<f64>, vertical: Option<f64>) -> Self {
        self.horizontal_alignment_ratio = horizontal;
        self.vertical_alignment_ratio = vertical;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_offset = horizontal;
        self.vertical_offset = vertical;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ViewChangeOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_target_rect(mut self, rect: Rect) -> Self {
        self.target_rect = Some(rect);
        self
    }
}

/// Request data kept on the queued offsets change so the target can be
/// recomputed before dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BringIntoViewContext {
    pub element: ElementId,
    pub target_rect: Option<Rect>,
    pub horizontal_alignment_ratio: Option<f64>,
    pub vertical_alignment_ratio: Option<f64>,
    pub horizontal_offset: f64,
    pub vertical_offset: f64,
    /// Distance between the resolved target and the offsets it started from.
    pub applied_offset: Vector2,
}

impl BringIntoViewContext {
    pub fn from_request(request: &BringIntoViewRequest) -> Self {
        Self {
            element: request.element,
            target_rect: request.target_rect,
            horizontal_alignment_ratio: request.horizontal_alignment_ratio,
            vertical_alignment_ratio: request.vertical_alignment_ratio,
            horizontal_offset: request.horizontal_offset,
            vertical_offset: request.vertical_offset,
            applied_offset: Vector2::ZERO,
        }
    }

    /// Content-space rectangle to reveal, at zoom factor 1.
    pub fn content_rect(&self, locator: &dyn ElementLocator) -> Option<Rect> {
        let bounds = locator.element_bounds(self.element)?;
        Some(match self.target_rect {
            Some(rect) => rect.offset(Vector2::new(bounds.x, bounds.y)),
            None => bounds,
        })
    }
}

/// Geometry the target is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    pub current: Point,
    pub viewport: Size,
    pub zoom_factor: f64,
    /// Largest valid offsets.
    pub max_offsets: Point,
}

/// Target offsets revealing `rect`, clamped to the scrollable range.
pub fn compute_target_offsets(
    context: &BringIntoViewContext,
    rect: Rect,
    geometry: &ViewportGeometry,
) -> Point {
    let zoomed = rect.scaled(geometry.zoom_factor);
    let x = axis_target(
        zoomed.x,
        zoomed.width,
        geometry.current.x,
        geometry.viewport.width,
        context.horizontal_alignment_ratio,
    ) + context.horizontal_offset;
    let y = axis_target(
        zoomed.y,
        zoomed.height,
        geometry.current.y,
        geometry.viewport.height,
        context.vertical_alignment_ratio,
    ) + context.vertical_offset;
    Point::new(
        x.clamp(0.0, geometry.max_offsets.x.max(0.0)),
        y.clamp(0.0, geometry.max_offsets.y.max(0.0)),
    )
}

fn axis_target(start: f64, length: f64, current: f64, viewport: f64, ratio: Option<f64>) -> f64 {
    match ratio {
        Some(ratio) => start - (viewport - length) * ratio.clamp(0.0, 1.0),
        None => {
            let end = start + length;
            if start < current {
                start
            } else if end > current + viewport {
                if length > viewport { start } else { end - viewport }
            } else {
                current
            }
        }
    }
}
