//! Comparison and arithmetic rule engines over temporal operands.
//!
//! The engines dispatch over the closed [`Operand`] set: for every pair of
//! kinds and every operation there is a defined outcome, either a result or
//! a specific [`EngineError`]. Results come wrapped in [`Evaluated`], which
//! carries non-fatal [`Advisory`] diagnostics (also mirrored to `tracing`).
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`operand`] | [`Operand`] kind set |
//! | [`compare`] | [`compare`](compare::compare), [`CmpOp`], [`CmpResult`] |
//! | [`arith`] | [`add`](arith::add), [`sub`](arith::sub) |
//! | [`advisory`] | [`Evaluated`], [`Advisory`] |
//! | [`config`] | [`CmpConfig`] comparison policy |
//! | [`error`] | [`EngineError`] |
//!
//! # Quick Start
//!
//! ```
//! use tempus_engine::{add, CmpConfig, CmpOp, CmpResult, compare, Operand};
//! use tempus_instant::{Duration, Instant};
//!
//! # fn main() -> Result<(), tempus_engine::EngineError> {
//! let t = Operand::Instant(Instant::from_ymd(2020, 1, 1)?);
//! let d = Operand::Duration(Duration::from_hours(24)?);
//! let shifted = add(&t, &d)?.into_value();
//!
//! let next = Operand::Instant(Instant::from_ymd(2020, 1, 2)?);
//! let eq = compare(&shifted, CmpOp::Eq, &next, &CmpConfig::new())?;
//! assert_eq!(*eq.value(), CmpResult::Scalar(true));
//! # Ok(())
//! # }
//! ```

pub mod advisory;
pub mod arith;
pub mod compare;
pub mod config;
pub mod error;
pub mod operand;

pub use advisory::{Advisory, Evaluated};
pub use arith::{add, sub};
pub use compare::{compare, CmpOp, CmpResult};
pub use config::CmpConfig;
pub use error::EngineError;
pub use operand::Operand;
