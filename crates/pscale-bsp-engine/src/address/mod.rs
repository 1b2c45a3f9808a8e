//! Spindle parsing and tree addresses.
//!
//! A spindle is a decimal-like number whose digits are tree keys. Three
//! formats are recognised, told apart by the integer part:
//!
//! | spindle | format       | walk          | root pscale |
//! |---------|--------------|---------------|-------------|
//! | `0.234` | delineation  | `2`, `3`, `4` | 0           |
//! | `23.45` | split        | `2`..`5`      | 2           |
//! | `2345`  | no pscale    | `2`..`5`      | none        |

pub mod navigation;
pub mod spindle;

pub use navigation::Address;
pub use spindle::{ParsedAddress, SPINDLE_PRECISION, Spindle, SpindleFormat};
