//! Viewport and coordinate transformation for the plan canvas.
//!
//! Converts between screen pixels and plan coordinates (grid units). One
//! grid unit spans `pixels_per_unit * zoom` pixels; screen and plan share
//! the same axis orientation (y grows downwards).

use std::fmt;

use museumkit_core::{Bounds, Point};
use museumkit_settings::{EditorConfig, ViewSettings};
use serde::{Deserialize, Serialize};

const DEFAULT_CANVAS: (f64, f64) = (1200.0, 800.0);

/// Zoom and pan state of the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    pixels_per_unit: f64,
    limits: ViewSettings,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            pixels_per_unit: museumkit_settings::GridSettings::default().pixels_per_unit,
            limits: ViewSettings::default(),
        }
    }

    /// Viewport using the grid scale and zoom limits of `config`
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            pixels_per_unit: config.grid.pixels_per_unit,
            limits: config.view.clone(),
            ..Self::new(DEFAULT_CANVAS.0, DEFAULT_CANVAS.1)
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Called when the host canvas is resized
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Effective pixels per grid unit at the current zoom
    pub fn scale(&self) -> f64 {
        self.pixels_per_unit * self.zoom
    }

    /// Set the zoom level, clamped to the configured range
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom.clamp(self.limits.min_zoom, self.limits.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.limits.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.limits.zoom_step);
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pan by a pixel delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Screen pixel to plan coordinates
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let scale = self.scale();
        Point::new((pixel_x - self.pan_x) / scale, (pixel_y - self.pan_y) / scale)
    }

    /// Plan coordinates to screen pixel
    pub fn world_to_pixel(&self, point: Point) -> (f64, f64) {
        let scale = self.scale();
        (point.x * scale + self.pan_x, point.y * scale + self.pan_y)
    }

    /// Zoom while keeping `world_point` under the same pixel
    pub fn zoom_to_point(&mut self, world_point: Point, new_zoom: f64) {
        let (pixel_x, pixel_y) = self.world_to_pixel(world_point);
        self.set_zoom(new_zoom);
        let scale = self.scale();
        self.pan_x = pixel_x - world_point.x * scale;
        self.pan_y = pixel_y - world_point.y * scale;
    }

    pub fn zoom_in_at(&mut self, world_point: Point) {
        self.zoom_to_point(world_point, self.zoom * self.limits.zoom_step);
    }

    pub fn zoom_out_at(&mut self, world_point: Point) {
        self.zoom_to_point(world_point, self.zoom / self.limits.zoom_step);
    }

    /// Fit `bounds` into the canvas, keeping `padding` (fraction of the
    /// canvas, per side) free around it
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        let usable = 1.0 - padding.clamp(0.0, 0.45) * 2.0;
        let zoom_x = self.canvas_width * usable / (bounds.width() * self.pixels_per_unit);
        let zoom_y = self.canvas_height * usable / (bounds.height() * self.pixels_per_unit);
        self.set_zoom(zoom_x.min(zoom_y));
        self.center_on(bounds.center());
    }

    /// Put `point` in the middle of the canvas
    pub fn center_on(&mut self, point: Point) {
        let scale = self.scale();
        self.pan_x = self.canvas_width / 2.0 - point.x * scale;
        self.pan_y = self.canvas_height / 2.0 - point.y * scale;
    }

    /// Visible plan area
    pub fn visible_bounds(&self) -> Bounds {
        let top_left = self.pixel_to_world(0.0, 0.0);
        let bottom_right = self.pixel_to_world(self.canvas_width, self.canvas_height);
        Bounds {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: bottom_right.x,
            max_y: bottom_right.y,
        }
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS.0, DEFAULT_CANVAS.1)
    }
}
