//! Comparison engine: per-kind dispatch for the six comparison operators.

use tempus_instant::{civil, parse_instant, Zone, NAT};
use tempus_offset::Period;
use tracing::debug;

use crate::advisory::{Advisory, Evaluated};
use crate::config::CmpConfig;
use crate::error::EngineError;
use crate::operand::Operand;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Operator spelling used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    fn is_equality(self) -> bool {
        matches!(self, CmpOp::Eq | CmpOp::Ne)
    }
}

/// Result of a comparison: a scalar, or one bool per element when either
/// operand is a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum CmpResult {
    Scalar(bool),
    Vector(Vec<bool>),
}

/// Compares two operands under the given policy.
///
/// Dispatch is priority ordered: the not-a-time scalar decides first and
/// never errors, then non-temporal nulls, then periods, then instant-like
/// and duration-like pairs, and finally the unrelated-operand rule where
/// equality is decidable but ordering is not.
///
/// # Errors
///
/// [`EngineError::TzAwareness`] when instant-like operands mix naive and
/// aware values (all six operators), [`EngineError::InvalidComparison`] for
/// ordering against a null scalar, [`EngineError::LengthMismatch`] for
/// unequal sequences, [`EngineError::Incompatible`] otherwise.
pub fn compare(
    lhs: &Operand,
    op: CmpOp,
    rhs: &Operand,
    cfg: &CmpConfig,
) -> Result<Evaluated<CmpResult>, EngineError> {
    // The not-a-time scalar behaves like a float NaN and bypasses every
    // other rule, the tz-awareness check included.
    if matches!(lhs, Operand::Missing) || matches!(rhs, Operand::Missing) {
        return Ok(Evaluated::new(broadcast(op == CmpOp::Ne, lhs, rhs)?));
    }

    // A non-temporal null has a decidable equality but no ordering.
    if matches!(lhs, Operand::Null) || matches!(rhs, Operand::Null) {
        return match op {
            CmpOp::Eq => Ok(Evaluated::new(broadcast(false, lhs, rhs)?)),
            CmpOp::Ne => Ok(Evaluated::new(broadcast(true, lhs, rhs)?)),
            _ => Err(EngineError::InvalidComparison { op: op.name() }),
        };
    }

    if let Some(result) = compare_periods(lhs, op, rhs)? {
        return Ok(Evaluated::new(result));
    }

    let left = instant_view(lhs, rhs);
    let right = instant_view(rhs, lhs);
    if let (Some(a), Some(b)) = (&left, &right) {
        let coerced_date = a.from_date || b.from_date;
        if coerced_date && cfg.reject_date_comparison() {
            return Err(incompatible("compare", lhs, rhs));
        }
        check_zones(a.zone.as_ref(), b.zone.as_ref())?;
        let result = elementwise(op, &a.values, &b.values)?;
        let evaluated = Evaluated::new(result);
        return Ok(if coerced_date {
            evaluated.advise(Advisory::DeprecatedDateComparison)
        } else {
            evaluated
        });
    }

    let left_dur = duration_view(lhs);
    let right_dur = duration_view(rhs);
    if let (Some(a), Some(b)) = (&left_dur, &right_dur) {
        return Ok(Evaluated::new(elementwise(op, a, b)?));
    }

    // One temporal side against anything else: equality is decidable
    // (always unequal), ordering is not.
    let left_temporal = left.is_some() || left_dur.is_some();
    let right_temporal = right.is_some() || right_dur.is_some();
    if left_temporal || right_temporal {
        if op.is_equality() {
            debug!(
                op = op.name(),
                left = lhs.kind_name(),
                right = rhs.kind_name(),
                "unrelated operands compare unequal"
            );
            return Ok(Evaluated::new(broadcast(op == CmpOp::Ne, lhs, rhs)?));
        }
        return Err(incompatible("compare", lhs, rhs));
    }

    Err(incompatible("compare", lhs, rhs))
}

fn incompatible(op: &'static str, lhs: &Operand, rhs: &Operand) -> EngineError {
    EngineError::Incompatible {
        op,
        left: lhs.kind_name(),
        right: rhs.kind_name(),
    }
}

/// Constant result shaped to the wider of the two operands.
fn broadcast(value: bool, lhs: &Operand, rhs: &Operand) -> Result<CmpResult, EngineError> {
    match (lhs.len(), rhs.len()) {
        (Some(a), Some(b)) if a != b => Err(EngineError::LengthMismatch { left: a, right: b }),
        (Some(n), _) | (_, Some(n)) => Ok(CmpResult::Vector(vec![value; n])),
        (None, None) => Ok(CmpResult::Scalar(value)),
    }
}

enum Values<'a> {
    One(i64),
    Many(&'a [i64]),
}

struct InstantView<'a> {
    values: Values<'a>,
    zone: Option<Zone>,
    from_date: bool,
}

/// Reads an operand as instant-like raw values, parsing strings and
/// coercing civil dates to midnight. Naive parsed strings adopt the other
/// operand's zone.
fn instant_view<'a>(op: &'a Operand, other: &Operand) -> Option<InstantView<'a>> {
    match op {
        Operand::Instant(t) => Some(InstantView {
            values: Values::One(t.value()),
            zone: t.zone().cloned(),
            from_date: false,
        }),
        Operand::Instants(s) => Some(InstantView {
            values: Values::Many(s.values()),
            zone: s.zone().cloned(),
            from_date: false,
        }),
        Operand::DatetimeArray(v) => Some(InstantView {
            values: Values::Many(v),
            zone: None,
            from_date: false,
        }),
        Operand::Str(s) => {
            let mut parsed = parse_instant(s).ok()?;
            if !parsed.is_aware() {
                if let Some(zone) = zone_of(other) {
                    parsed = parsed.localize(zone).ok()?;
                }
            }
            Some(InstantView {
                values: Values::One(parsed.value()),
                zone: parsed.zone().cloned(),
                from_date: false,
            })
        }
        Operand::Date(d) => Some(InstantView {
            values: Values::One(civil::to_epoch_ns(*d, 0).ok()?),
            zone: None,
            from_date: true,
        }),
        _ => None,
    }
}

fn zone_of(op: &Operand) -> Option<Zone> {
    match op {
        Operand::Instant(t) => t.zone().cloned(),
        Operand::Instants(s) => s.zone().cloned(),
        _ => None,
    }
}

fn duration_view(op: &Operand) -> Option<Values<'_>> {
    match op {
        Operand::Duration(d) => Some(Values::One(d.nanos())),
        Operand::Durations(s) => Some(Values::Many(s.values())),
        _ => None,
    }
}

fn check_zones(left: Option<&Zone>, right: Option<&Zone>) -> Result<(), EngineError> {
    match (left, right) {
        (None, None) => Ok(()),
        (Some(a), Some(b)) if a == b => Ok(()),
        _ => Err(EngineError::TzAwareness {
            left: left.map(|z| z.key().to_string()),
            right: right.map(|z| z.key().to_string()),
        }),
    }
}

/// Raw element rule. Missing sentinels behave like float NaN: equal to
/// nothing, unequal to everything, never ordered.
fn cmp_ns(op: CmpOp, a: i64, b: i64) -> bool {
    if a == NAT || b == NAT {
        return op == CmpOp::Ne;
    }
    match op {
        CmpOp::Eq => a == b,
        CmpOp::Ne => a != b,
        CmpOp::Lt => a < b,
        CmpOp::Le => a <= b,
        CmpOp::Gt => a > b,
        CmpOp::Ge => a >= b,
    }
}

fn elementwise(op: CmpOp, a: &Values<'_>, b: &Values<'_>) -> Result<CmpResult, EngineError> {
    match (a, b) {
        (Values::One(x), Values::One(y)) => Ok(CmpResult::Scalar(cmp_ns(op, *x, *y))),
        (Values::One(x), Values::Many(ys)) => {
            Ok(CmpResult::Vector(ys.iter().map(|&y| cmp_ns(op, *x, y)).collect()))
        }
        (Values::Many(xs), Values::One(y)) => {
            Ok(CmpResult::Vector(xs.iter().map(|&x| cmp_ns(op, x, *y)).collect()))
        }
        (Values::Many(xs), Values::Many(ys)) => {
            if xs.len() != ys.len() {
                return Err(EngineError::LengthMismatch {
                    left: xs.len(),
                    right: ys.len(),
                });
            }
            Ok(CmpResult::Vector(
                xs.iter().zip(ys.iter()).map(|(&x, &y)| cmp_ns(op, x, y)).collect(),
            ))
        }
    }
}

fn cmp_ordinal(op: CmpOp, a: i64, b: i64) -> bool {
    match op {
        CmpOp::Eq => a == b,
        CmpOp::Ne => a != b,
        CmpOp::Lt => a < b,
        CmpOp::Le => a <= b,
        CmpOp::Gt => a > b,
        CmpOp::Ge => a >= b,
    }
}

/// Periods compare by ordinal within a single unit. Returns `Ok(None)` when
/// neither side is period-like.
fn compare_periods(
    lhs: &Operand,
    op: CmpOp,
    rhs: &Operand,
) -> Result<Option<CmpResult>, EngineError> {
    let unit_err = || incompatible("compare", lhs, rhs);
    let pairwise = |pairs: &mut dyn Iterator<Item = (Period, Period)>| {
        let mut out = Vec::new();
        for (a, b) in pairs {
            if a.unit() != b.unit() {
                return Err(unit_err());
            }
            out.push(cmp_ordinal(op, a.ordinal(), b.ordinal()));
        }
        Ok(CmpResult::Vector(out))
    };
    match (lhs, rhs) {
        (Operand::Period(a), Operand::Period(b)) => {
            if a.unit() != b.unit() {
                return Err(unit_err());
            }
            Ok(Some(CmpResult::Scalar(cmp_ordinal(op, a.ordinal(), b.ordinal()))))
        }
        (Operand::Period(a), Operand::Periods(bs)) => {
            pairwise(&mut bs.iter().map(|&b| (*a, b))).map(Some)
        }
        (Operand::Periods(xs), Operand::Period(b)) => {
            pairwise(&mut xs.iter().map(|&a| (a, *b))).map(Some)
        }
        (Operand::Periods(xs), Operand::Periods(bs)) => {
            if xs.len() != bs.len() {
                return Err(EngineError::LengthMismatch {
                    left: xs.len(),
                    right: bs.len(),
                });
            }
            pairwise(&mut xs.iter().copied().zip(bs.iter().copied())).map(Some)
        }
        // A period against anything non-period is never equal and never
        // ordered.
        (Operand::Period(_) | Operand::Periods(_), _)
        | (_, Operand::Period(_) | Operand::Periods(_)) => {
            if op.is_equality() {
                Ok(Some(broadcast(op == CmpOp::Ne, lhs, rhs)?))
            } else {
                Err(unit_err())
            }
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempus_instant::Instant;
    use tempus_offset::PeriodUnit;
    use tempus_sequence::DatetimeSequence;

    fn seq(values: Vec<i64>) -> Operand {
        Operand::Instants(DatetimeSequence::new(values, None))
    }

    fn bools(r: &Evaluated<CmpResult>) -> Vec<bool> {
        match r.value() {
            CmpResult::Vector(v) => v.clone(),
            CmpResult::Scalar(b) => vec![*b],
        }
    }

    #[test]
    fn nat_elements_behave_like_nan() {
        let cfg = CmpConfig::new();
        let a = seq(vec![10, NAT, 30]);
        let b = seq(vec![10, 20, 20]);
        assert_eq!(bools(&compare(&a, CmpOp::Eq, &b, &cfg).unwrap()), vec![true, false, false]);
        assert_eq!(bools(&compare(&a, CmpOp::Ne, &b, &cfg).unwrap()), vec![false, true, true]);
        assert_eq!(bools(&compare(&a, CmpOp::Lt, &b, &cfg).unwrap()), vec![false, false, false]);
        assert_eq!(bools(&compare(&a, CmpOp::Gt, &b, &cfg).unwrap()), vec![false, false, true]);
    }

    #[test]
    fn missing_scalar_bypasses_everything() {
        let cfg = CmpConfig::new();
        let a = seq(vec![1, 2]);
        for op in [CmpOp::Eq, CmpOp::Lt, CmpOp::Le, CmpOp::Gt, CmpOp::Ge] {
            assert_eq!(
                bools(&compare(&a, op, &Operand::Missing, &cfg).unwrap()),
                vec![false, false]
            );
        }
        assert_eq!(
            bools(&compare(&a, CmpOp::Ne, &Operand::Missing, &cfg).unwrap()),
            vec![true, true]
        );
    }

    #[test]
    fn null_scalar_orders_fail_but_equality_succeeds() {
        let cfg = CmpConfig::new();
        let a = seq(vec![1, 2]);
        assert_eq!(bools(&compare(&a, CmpOp::Eq, &Operand::Null, &cfg).unwrap()), vec![false, false]);
        assert_eq!(bools(&compare(&a, CmpOp::Ne, &Operand::Null, &cfg).unwrap()), vec![true, true]);
        assert!(matches!(
            compare(&a, CmpOp::Lt, &Operand::Null, &cfg),
            Err(EngineError::InvalidComparison { op: "<" })
        ));
    }

    #[test]
    fn period_unit_mismatch_fails() {
        let cfg = CmpConfig::new();
        let a = Operand::Period(Period::new(PeriodUnit::Month, 5));
        let b = Operand::Period(Period::new(PeriodUnit::Year, 5));
        assert!(matches!(
            compare(&a, CmpOp::Eq, &b, &cfg),
            Err(EngineError::Incompatible { .. })
        ));
        let c = Operand::Period(Period::new(PeriodUnit::Month, 7));
        let r = compare(&a, CmpOp::Lt, &c, &cfg).unwrap();
        assert_eq!(*r.value(), CmpResult::Scalar(true));
    }

    #[test]
    fn string_adopts_other_sides_zone() {
        let cfg = CmpConfig::new();
        let zone = Zone::utc();
        let t = Instant::from_ymd(2020, 1, 1).unwrap().localize(zone).unwrap();
        let r = compare(
            &Operand::Instant(t),
            CmpOp::Eq,
            &Operand::Str("2020-01-01 00:00".to_string()),
            &cfg,
        )
        .unwrap();
        assert_eq!(*r.value(), CmpResult::Scalar(true));
    }

    #[test]
    fn unparseable_string_is_unrelated() {
        let cfg = CmpConfig::new();
        let a = seq(vec![1, 2]);
        let s = Operand::Str("not a datetime".to_string());
        assert_eq!(bools(&compare(&a, CmpOp::Eq, &s, &cfg).unwrap()), vec![false, false]);
        assert!(matches!(
            compare(&a, CmpOp::Le, &s, &cfg),
            Err(EngineError::Incompatible { .. })
        ));
    }
}
