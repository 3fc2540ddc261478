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

//! Geometric formula registry.
//!
//! A closed catalog of supported shapes, each with per-calculation required
//! parameters. Requests are validated against the catalog before any formula
//! runs: unknown shape, unsupported calculation, missing parameter, and
//! out-of-range parameter each fail with their own kind. The catalog is
//! static and read-only, safe for unsynchronized concurrent reads.

mod formulas;

use crate::errors::{ErrorKind, Failure};
use crate::solver::ResponseStatus;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Supported shapes; extending the catalog means extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Square,
    Circle,
    Triangle,
    Trapezoid,
    Parallelogram,
    Ellipse,
    RegularPolygon,
    Cylinder,
    Sphere,
    Cone,
    Pyramid,
}

impl ShapeKind {
    /// Returns the shape's catalog name.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Trapezoid => "Trapezoid",
            ShapeKind::Parallelogram => "Parallelogram",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::RegularPolygon => "RegularPolygon",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cone => "Cone",
            ShapeKind::Pyramid => "Pyramid",
        }
    }

    /// Looks up a shape by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        CATALOG
            .iter()
            .map(|spec| spec.kind)
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Returns this shape's catalog entry.
    pub fn spec(self) -> &'static ShapeSpec {
        // The catalog carries exactly one entry per variant.
        CATALOG
            .iter()
            .find(|spec| spec.kind == self)
            .expect("catalog covers every shape variant")
    }
}

/// Supported calculation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalcKind {
    Area,
    Perimeter,
    Volume,
    SurfaceArea,
}

impl CalcKind {
    /// Returns the wire name.
    pub fn name(self) -> &'static str {
        match self {
            CalcKind::Area => "area",
            CalcKind::Perimeter => "perimeter",
            CalcKind::Volume => "volume",
            CalcKind::SurfaceArea => "surfaceArea",
        }
    }

    /// Looks up a calculation kind; `surface_area` is accepted as an alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "area" => Some(CalcKind::Area),
            "perimeter" => Some(CalcKind::Perimeter),
            "volume" => Some(CalcKind::Volume),
            "surfacearea" | "surface_area" => Some(CalcKind::SurfaceArea),
            _ => None,
        }
    }
}

/// One supported calculation with its required parameters, in order.
#[derive(Debug, Clone, Copy)]
pub struct CalcSpec {
    /// Calculation kind.
    pub kind: CalcKind,
    /// Required parameter names, validated in this order.
    pub params: &'static [&'static str],
}

/// Static catalog descriptor for one shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeSpec {
    /// Shape identity.
    pub kind: ShapeKind,
    /// Supported calculations.
    pub calcs: &'static [CalcSpec],
}

const fn calc(kind: CalcKind, params: &'static [&'static str]) -> CalcSpec {
    CalcSpec { kind, params }
}

/// The shape catalog, in listing order. Established once, never mutated.
static CATALOG: [ShapeSpec; 12] = [
    ShapeSpec {
        kind: ShapeKind::Rectangle,
        calcs: &[
            calc(CalcKind::Area, &["l", "w"]),
            calc(CalcKind::Perimeter, &["l", "w"]),
            calc(CalcKind::Volume, &["l", "w", "h"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Square,
        calcs: &[
            calc(CalcKind::Area, &["s"]),
            calc(CalcKind::Perimeter, &["s"]),
            calc(CalcKind::Volume, &["s", "h"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Circle,
        calcs: &[
            calc(CalcKind::Area, &["r"]),
            calc(CalcKind::Perimeter, &["r"]),
            calc(CalcKind::Volume, &["r"]),
            calc(CalcKind::SurfaceArea, &["r"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Triangle,
        calcs: &[
            calc(CalcKind::Area, &["b", "h"]),
            calc(CalcKind::Perimeter, &["b", "s", "side3"]),
            calc(CalcKind::Volume, &["b", "h", "depth"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Trapezoid,
        calcs: &[
            calc(CalcKind::Area, &["top_base", "bottom_base", "h"]),
            calc(
                CalcKind::Perimeter,
                &["top_base", "bottom_base", "left_side", "right_side"],
            ),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Parallelogram,
        calcs: &[
            calc(CalcKind::Area, &["b", "h"]),
            calc(CalcKind::Perimeter, &["b", "s"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Ellipse,
        calcs: &[
            calc(CalcKind::Area, &["major", "minor"]),
            calc(CalcKind::Perimeter, &["major", "minor"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::RegularPolygon,
        calcs: &[
            calc(CalcKind::Area, &["s", "vertices"]),
            calc(CalcKind::Perimeter, &["s", "vertices"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Cylinder,
        calcs: &[
            calc(CalcKind::Volume, &["r", "h"]),
            calc(CalcKind::SurfaceArea, &["r", "h"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Sphere,
        calcs: &[
            calc(CalcKind::Volume, &["r"]),
            calc(CalcKind::SurfaceArea, &["r"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Cone,
        calcs: &[
            calc(CalcKind::Volume, &["r", "h"]),
            calc(CalcKind::SurfaceArea, &["r", "h"]),
        ],
    },
    ShapeSpec {
        kind: ShapeKind::Pyramid,
        calcs: &[
            calc(CalcKind::Volume, &["base_area", "h"]),
            calc(
                CalcKind::SurfaceArea,
                &["base_area", "base_perimeter", "slant_height"],
            ),
        ],
    },
];

/// Returns the catalog in stable definition order.
pub fn list_shapes() -> &'static [ShapeSpec] {
    &CATALOG
}

/// One shape calculation request, as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcRequest {
    /// Catalog shape name.
    pub shape: String,
    /// Requested calculation (`area`, `perimeter`, `volume`, `surfaceArea`).
    pub calc_type: String,
    /// Named numeric parameters; unknown extras are ignored.
    pub params: BTreeMap<String, f64>,
}

impl CalcRequest {
    /// Creates a request from parts.
    pub fn new(
        shape: impl Into<String>,
        calc_type: impl Into<String>,
        params: &[(&str, f64)],
    ) -> Self {
        Self {
            shape: shape.into(),
            calc_type: calc_type.into(),
            params: params
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }
}

/// Validates a request against the catalog and dispatches the formula.
pub fn calculate(request: &CalcRequest) -> Result<f64, Failure> {
    let Some(shape) = ShapeKind::from_name(&request.shape) else {
        return Err(Failure::new(
            ErrorKind::UnknownShape,
            format!("shape '{}' is not in the catalog", request.shape),
        ));
    };

    let Some(calc_kind) = CalcKind::from_name(&request.calc_type) else {
        return Err(Failure::new(
            ErrorKind::UnsupportedCalculation,
            format!("'{}' is not a recognized calculation", request.calc_type),
        ));
    };

    let spec = shape.spec();
    let Some(calc_spec) = spec.calcs.iter().find(|c| c.kind == calc_kind) else {
        return Err(Failure::new(
            ErrorKind::UnsupportedCalculation,
            format!(
                "{} does not support {}",
                shape.name(),
                calc_kind.name()
            ),
        ));
    };

    // Presence first, then range, in declared parameter order.
    for name in calc_spec.params {
        if !request.params.contains_key(*name) {
            return Err(Failure::new(
                ErrorKind::MissingParameter,
                format!("missing required parameter '{name}'"),
            ));
        }
    }
    for name in calc_spec.params {
        let value = request.params[*name];
        validate_param(name, value)?;
    }

    let value = dispatch(shape, calc_kind, &request.params)?;
    debug!(
        "{} {} computed as {value}",
        shape.name(),
        calc_kind.name()
    );
    Ok(value)
}

/// Range validation: lengths are strictly positive and finite; vertex counts
/// are integral and at least 3.
fn validate_param(name: &str, value: f64) -> Result<(), Failure> {
    if !value.is_finite() {
        return Err(Failure::new(
            ErrorKind::InvalidParameter,
            format!("parameter '{name}' must be finite"),
        ));
    }
    if value <= 0.0 {
        return Err(Failure::new(
            ErrorKind::InvalidParameter,
            format!("parameter '{name}' must be strictly positive"),
        ));
    }
    if name == "vertices" {
        if value.fract() != 0.0 {
            return Err(Failure::new(
                ErrorKind::InvalidParameter,
                format!("parameter '{name}' must be a whole number"),
            ));
        }
        if value < 3.0 {
            return Err(Failure::new(
                ErrorKind::InvalidParameter,
                format!("parameter '{name}' must be at least 3"),
            ));
        }
    }
    Ok(())
}

/// Pure `(shape, calc) -> formula` lookup over validated parameters.
fn dispatch(
    shape: ShapeKind,
    calc_kind: CalcKind,
    params: &BTreeMap<String, f64>,
) -> Result<f64, Failure> {
    use formulas::*;

    // Required parameters were checked above; absent lookups cannot happen.
    let p = |name: &str| params.get(name).copied().unwrap_or(f64::NAN);

    let value = match (shape, calc_kind) {
        (ShapeKind::Rectangle, CalcKind::Area) => rectangle_area(p("l"), p("w")),
        (ShapeKind::Rectangle, CalcKind::Perimeter) => rectangle_perimeter(p("l"), p("w")),
        (ShapeKind::Rectangle, CalcKind::Volume) => rectangle_volume(p("l"), p("w"), p("h")),

        (ShapeKind::Square, CalcKind::Area) => square_area(p("s")),
        (ShapeKind::Square, CalcKind::Perimeter) => square_perimeter(p("s")),
        (ShapeKind::Square, CalcKind::Volume) => square_volume(p("s"), p("h")),

        (ShapeKind::Circle, CalcKind::Area) => circle_area(p("r")),
        (ShapeKind::Circle, CalcKind::Perimeter) => circle_circumference(p("r")),
        // A circle's volume/surface refer to the sphere it bounds.
        (ShapeKind::Circle, CalcKind::Volume) => sphere_volume(p("r")),
        (ShapeKind::Circle, CalcKind::SurfaceArea) => sphere_surface_area(p("r")),

        (ShapeKind::Triangle, CalcKind::Area) => triangle_area(p("b"), p("h")),
        (ShapeKind::Triangle, CalcKind::Perimeter) => {
            triangle_perimeter(p("b"), p("s"), p("side3"))
        }
        (ShapeKind::Triangle, CalcKind::Volume) => triangle_volume(p("b"), p("h"), p("depth")),

        (ShapeKind::Trapezoid, CalcKind::Area) => {
            trapezoid_area(p("top_base"), p("bottom_base"), p("h"))
        }
        (ShapeKind::Trapezoid, CalcKind::Perimeter) => trapezoid_perimeter(
            p("top_base"),
            p("bottom_base"),
            p("left_side"),
            p("right_side"),
        ),

        (ShapeKind::Parallelogram, CalcKind::Area) => parallelogram_area(p("b"), p("h")),
        (ShapeKind::Parallelogram, CalcKind::Perimeter) => {
            parallelogram_perimeter(p("b"), p("s"))
        }

        (ShapeKind::Ellipse, CalcKind::Area) => ellipse_area(p("major"), p("minor")),
        (ShapeKind::Ellipse, CalcKind::Perimeter) => ellipse_perimeter(p("major"), p("minor")),

        (ShapeKind::RegularPolygon, CalcKind::Area) => {
            regular_polygon_area(p("s"), p("vertices"))
        }
        (ShapeKind::RegularPolygon, CalcKind::Perimeter) => {
            regular_polygon_perimeter(p("s"), p("vertices"))
        }

        (ShapeKind::Cylinder, CalcKind::Volume) => cylinder_volume(p("r"), p("h")),
        (ShapeKind::Cylinder, CalcKind::SurfaceArea) => cylinder_surface_area(p("r"), p("h")),

        (ShapeKind::Sphere, CalcKind::Volume) => sphere_volume(p("r")),
        (ShapeKind::Sphere, CalcKind::SurfaceArea) => sphere_surface_area(p("r")),

        (ShapeKind::Cone, CalcKind::Volume) => cone_volume(p("r"), p("h")),
        (ShapeKind::Cone, CalcKind::SurfaceArea) => cone_surface_area(p("r"), p("h")),

        (ShapeKind::Pyramid, CalcKind::Volume) => pyramid_volume(p("base_area"), p("h")),
        (ShapeKind::Pyramid, CalcKind::SurfaceArea) => pyramid_surface_area(
            p("base_area"),
            p("base_perimeter"),
            p("slant_height"),
        ),

        // Reachable only if the catalog and this table drift apart.
        _ => {
            return Err(Failure::new(
                ErrorKind::UnsupportedCalculation,
                format!("{} does not support {}", shape.name(), calc_kind.name()),
            ));
        }
    };

    Ok(value)
}

/// Serializable calculation outcome consumed by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcResponse {
    /// `"ok"` or `"error"`.
    pub status: ResponseStatus,
    /// Present on success; unit-agnostic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Present on failure; stable identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Present on failure; human-readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CalcResponse {
    /// Wraps a calculation outcome into the wire shape.
    pub fn from_result(result: Result<f64, Failure>) -> Self {
        match result {
            Ok(value) => Self {
                status: ResponseStatus::Ok,
                value: Some(value),
                error_kind: None,
                message: None,
            },
            Err(failure) => Self {
                status: ResponseStatus::Error,
                value: None,
                error_kind: Some(failure.kind),
                message: Some(failure.message),
            },
        }
    }
}

/// One catalog entry in the caller-facing listing shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeListing {
    /// Catalog shape name.
    pub shape: &'static str,
    /// Supported calculation kinds, in catalog order.
    pub supported_calc_types: Vec<&'static str>,
    /// Required parameters per calculation, in validation order.
    pub required_params: IndexMap<&'static str, Vec<&'static str>>,
}

/// Returns the caller-facing catalog listing in stable order.
pub fn shape_listing() -> Vec<ShapeListing> {
    CATALOG
        .iter()
        .map(|spec| ShapeListing {
            shape: spec.kind.name(),
            supported_calc_types: spec.calcs.iter().map(|c| c.kind.name()).collect(),
            required_params: spec
                .calcs
                .iter()
                .map(|c| (c.kind.name(), c.params.to_vec()))
                .collect(),
        })
        .collect()
}
