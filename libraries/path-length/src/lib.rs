//! Arc-length queries over SVG path data.
//!
//! A [`Path`] is assembled from path data once, caching the length of every segment, and then answers where a point
//! lies after travelling a given distance along it, together with the direction of travel there.
//!
//! ```
//! use path_length::Path;
//!
//! let path: Path = "M0,0 L10,0 L10,10".parse().unwrap();
//! assert_eq!(path.total_length(), 20.);
//! assert_eq!(path.point_at_length(15.).unwrap(), glam::DVec2::new(10., 5.));
//! ```

mod arc_length;
mod error;
mod lookup;
mod math;
mod options;
mod path;
mod path_command;
mod path_data;
mod segment;

pub use arc_length::{cubic_arc_length, quadratic_arc_length, t_from_length};
pub use error::{GeometryError, ParseError};
pub use lookup::{LookupEntry, LookupTable};
pub use options::{PathOptions, SolverOptions};
pub use path::{PartAtLength, Path, PathPart};
pub use path_command::{CommandKind, PathCommand, path_to_path_data};
pub use path_data::{DEFAULT_PATH_DATA, parse_path_data};
pub use segment::{ArcCenterParametrization, CubicBezier, EllipticalArc, LineSegment, PathSegment, PointProperties, QuadraticBezier};
