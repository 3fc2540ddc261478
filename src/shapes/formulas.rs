/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Closed-form geometric formulas.
//!
//! Pure functions over pre-validated positive inputs: no iteration, no I/O,
//! no mutation. Parameter validation lives in the registry, not here.

use std::f64::consts::PI;

pub(super) fn rectangle_area(length: f64, width: f64) -> f64 {
    length * width
}

pub(super) fn rectangle_perimeter(length: f64, width: f64) -> f64 {
    2.0 * (length + width)
}

/// Rectangular prism volume.
pub(super) fn rectangle_volume(length: f64, width: f64, height: f64) -> f64 {
    length * width * height
}

pub(super) fn square_area(side: f64) -> f64 {
    side * side
}

pub(super) fn square_perimeter(side: f64) -> f64 {
    4.0 * side
}

/// Square prism volume.
pub(super) fn square_volume(side: f64, height: f64) -> f64 {
    side * side * height
}

pub(super) fn circle_area(radius: f64) -> f64 {
    PI * radius * radius
}

pub(super) fn circle_circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

pub(super) fn triangle_area(base: f64, height: f64) -> f64 {
    0.5 * base * height
}

pub(super) fn triangle_perimeter(side1: f64, side2: f64, side3: f64) -> f64 {
    side1 + side2 + side3
}

/// Triangular prism volume.
pub(super) fn triangle_volume(base: f64, height: f64, depth: f64) -> f64 {
    0.5 * base * height * depth
}

pub(super) fn trapezoid_area(top_base: f64, bottom_base: f64, height: f64) -> f64 {
    0.5 * (top_base + bottom_base) * height
}

pub(super) fn trapezoid_perimeter(
    top_base: f64,
    bottom_base: f64,
    left_side: f64,
    right_side: f64,
) -> f64 {
    top_base + bottom_base + left_side + right_side
}

pub(super) fn parallelogram_area(base: f64, height: f64) -> f64 {
    base * height
}

pub(super) fn parallelogram_perimeter(base: f64, side: f64) -> f64 {
    2.0 * (base + side)
}

pub(super) fn ellipse_area(major_axis: f64, minor_axis: f64) -> f64 {
    PI * major_axis * minor_axis
}

/// Ramanujan's approximation; exact perimeter has no closed form.
pub(super) fn ellipse_perimeter(major_axis: f64, minor_axis: f64) -> f64 {
    let (a, b) = (major_axis, minor_axis);
    let h = ((a - b) / (a + b)).powi(2);
    PI * (a + b) * (1.0 + (3.0 * h) / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

pub(super) fn regular_polygon_area(side: f64, vertices: f64) -> f64 {
    (vertices * side * side) / (4.0 * (PI / vertices).tan())
}

pub(super) fn regular_polygon_perimeter(side: f64, vertices: f64) -> f64 {
    vertices * side
}

pub(super) fn cylinder_volume(radius: f64, height: f64) -> f64 {
    PI * radius * radius * height
}

pub(super) fn cylinder_surface_area(radius: f64, height: f64) -> f64 {
    2.0 * PI * radius * (radius + height)
}

pub(super) fn sphere_volume(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * radius.powi(3)
}

pub(super) fn sphere_surface_area(radius: f64) -> f64 {
    4.0 * PI * radius * radius
}

pub(super) fn cone_volume(radius: f64, height: f64) -> f64 {
    (1.0 / 3.0) * PI * radius * radius * height
}

pub(super) fn cone_surface_area(radius: f64, height: f64) -> f64 {
    let slant_height = (radius * radius + height * height).sqrt();
    PI * radius * (radius + slant_height)
}

pub(super) fn pyramid_volume(base_area: f64, height: f64) -> f64 {
    (1.0 / 3.0) * base_area * height
}

pub(super) fn pyramid_surface_area(base_area: f64, base_perimeter: f64, slant_height: f64) -> f64 {
    base_area + 0.5 * base_perimeter * slant_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_area_matches_closed_form() {
        assert!((circle_area(2.0) - 4.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn cylinder_surface_area_matches_closed_form() {
        // 2*pi*r*(r+h) with r=1, h=2.
        assert!((cylinder_surface_area(1.0, 2.0) - 6.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn cone_surface_area_derives_slant_height() {
        // r=3, h=4 gives slant 5: pi*3*(3+5) = 24*pi.
        assert!((cone_surface_area(3.0, 4.0) - 24.0 * PI).abs() < 1e-12);
    }

    #[test]
    fn ellipse_perimeter_is_exact_for_circles() {
        // Degenerates to a circle when both axes agree.
        assert!((ellipse_perimeter(2.0, 2.0) - circle_circumference(2.0)).abs() < 1e-9);
    }

    #[test]
    fn regular_polygon_area_approaches_circle() {
        // A many-sided unit polygon approximates its circumscribed circle.
        let area = regular_polygon_area(0.01, 1000.0);
        assert!(area > 0.0);
    }
}
