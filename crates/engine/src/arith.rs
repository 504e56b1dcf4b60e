//! Arithmetic engine: addition and subtraction over the operand set.

use tempus_instant::{checked_shift_ns, Duration, Instant, Zone, NAT};
use tempus_offset::CalendarOffset;
use tempus_sequence::{DatetimeSequence, DurationSequence};
use tracing::debug;

use crate::advisory::{Advisory, Evaluated};
use crate::error::EngineError;
use crate::operand::Operand;

/// Adds two operands. Commutative wherever the operation is legal.
///
/// # Errors
///
/// See [`EngineError`]; the per-pair rules are documented on the variants
/// and exercised by the crate's integration tests.
pub fn add(lhs: &Operand, rhs: &Operand) -> Result<Evaluated<Operand>, EngineError> {
    use Operand::*;
    match (lhs, rhs) {
        // sequence rows
        (Instants(s), Duration(d)) | (Duration(d), Instants(s)) => {
            seq_shift(s, *d, "sequence + duration")
        }
        (Instants(s), Durations(ds)) | (Durations(ds), Instants(s)) => {
            seq_shift_elementwise(s, ds.values(), 1)
        }
        (Instants(s), Offset(o)) | (Offset(o), Instants(s)) => seq_offset(s, o),
        (Instants(s), Offsets(v)) | (Offsets(v), Instants(s)) => seq_offsets(s, v, false),
        (Instants(s), Int(n)) | (Int(n), Instants(s)) => seq_int(s, *n),
        (Instants(s), Ints(v)) | (Ints(v), Instants(s)) => seq_ints(s, v, 1),
        (Instants(s), Missing) | (Missing, Instants(s)) => Ok(Evaluated::new(all_nat(s))),
        (Instants(_), _) | (_, Instants(_)) => Err(incompatible("add", lhs, rhs)),

        // duration-sequence rows
        (Durations(a), Durations(b)) => durations_zip(a, b, 1),
        (Durations(ds), Duration(d)) | (Duration(d), Durations(ds)) => {
            durations_scalar(ds, *d, 1)
        }
        (Durations(ds), Missing) | (Missing, Durations(ds)) => {
            Ok(Evaluated::new(all_nat_durations(ds.len())))
        }
        (Durations(_), _) | (_, Durations(_)) => Err(incompatible("add", lhs, rhs)),

        // scalar rows
        (Instant(t), Duration(d)) | (Duration(d), Instant(t)) => {
            Ok(Evaluated::new(Instant(t.checked_add(*d)?)))
        }
        (Instant(t), Offset(o)) | (Offset(o), Instant(t)) => {
            Ok(Evaluated::new(Instant(o.apply(t)?)))
        }
        (Duration(a), Duration(b)) => Ok(Evaluated::new(Duration(a.checked_add(*b)?))),
        (Missing, Instant(_) | Duration(_) | Offset(_) | Missing)
        | (Instant(_) | Duration(_) | Offset(_), Missing) => Ok(Evaluated::new(Missing)),

        _ => Err(incompatible("add", lhs, rhs)),
    }
}

/// Subtracts `rhs` from `lhs`.
///
/// # Errors
///
/// See [`EngineError`].
pub fn sub(lhs: &Operand, rhs: &Operand) -> Result<Evaluated<Operand>, EngineError> {
    use Operand::*;
    match (lhs, rhs) {
        // sequence rows
        (Instants(s), Duration(d)) => seq_shift(s, d.negated(), "sequence - duration"),
        (Instants(s), Durations(ds)) => seq_shift_elementwise(s, ds.values(), -1),
        (Instants(s), Offset(o)) => {
            let o = o.negated().ok_or(EngineError::Overflow {
                op: "sequence - offset",
            })?;
            seq_offset(s, &o)
        }
        (Instants(s), Offsets(v)) => seq_offsets(s, v, true),
        (Instants(s), Int(n)) => {
            let n = n.checked_neg().ok_or(EngineError::Overflow {
                op: "sequence - integer",
            })?;
            seq_int(s, n)
        }
        (Instants(s), Ints(v)) => seq_ints(s, v, -1),
        (Instants(s), Instant(t)) => seq_sub_values(s.values(), s.zone(), One(t)),
        (Instant(t), Instants(s)) => {
            Ok(negate_durations(seq_sub_values(s.values(), s.zone(), One(t))?))
        }
        (Instants(a), Instants(b)) => {
            check_zones(a.zone(), b.zone())?;
            check_lengths(a.len(), b.len())?;
            seq_sub_values(a.values(), None, Many(b.values()))
        }
        (Instants(s), DatetimeArray(v)) => {
            if s.is_aware() {
                return Err(incompatible("subtract", lhs, rhs));
            }
            check_lengths(s.len(), v.len())?;
            seq_sub_values(s.values(), None, Many(v))
        }
        (DatetimeArray(v), Instants(s)) => {
            if s.is_aware() {
                return Err(incompatible("subtract", lhs, rhs));
            }
            check_lengths(v.len(), s.len())?;
            seq_sub_values(v, None, Many(s.values()))
        }
        (Instants(s), Missing) | (Missing, Instants(s)) => Ok(Evaluated::new(all_nat(s))),
        (Instants(_), _) | (_, Instants(_)) => Err(incompatible("subtract", lhs, rhs)),

        // duration-sequence rows
        (Durations(a), Durations(b)) => durations_zip(a, b, -1),
        (Durations(ds), Duration(d)) => durations_scalar(ds, *d, -1),
        (Duration(d), Durations(ds)) => {
            let mut out = Vec::with_capacity(ds.len());
            for dur in ds.iter() {
                out.push(d.checked_sub(dur)?.nanos());
            }
            Ok(Evaluated::new(Durations(DurationSequence::new(out))))
        }
        (Durations(ds), Missing) | (Missing, Durations(ds)) => {
            Ok(Evaluated::new(all_nat_durations(ds.len())))
        }
        (Durations(_), _) | (_, Durations(_)) => Err(incompatible("subtract", lhs, rhs)),

        // scalar rows
        (Instant(t), Duration(d)) => Ok(Evaluated::new(Instant(t.checked_sub(*d)?))),
        (Instant(a), Instant(b)) => {
            check_zones(a.zone(), b.zone())?;
            Ok(Evaluated::new(Duration(tempus_instant::Duration::from_nanos(
                diff_ns(a.value(), b.value())?,
            ))))
        }
        (Instant(t), Offset(o)) => {
            let o = o.negated().ok_or(EngineError::Overflow {
                op: "instant - offset",
            })?;
            Ok(Evaluated::new(Instant(o.apply(t)?)))
        }
        (Duration(a), Duration(b)) => Ok(Evaluated::new(Duration(a.checked_sub(*b)?))),
        (Missing, Instant(_) | Duration(_) | Offset(_) | Missing)
        | (Instant(_) | Duration(_), Missing) => Ok(Evaluated::new(Missing)),

        _ => Err(incompatible("subtract", lhs, rhs)),
    }
}

enum Rhs<'a> {
    One(&'a Instant),
    Many(&'a [i64]),
}
use Rhs::{Many, One};

fn incompatible(op: &'static str, lhs: &Operand, rhs: &Operand) -> EngineError {
    EngineError::Incompatible {
        op,
        left: lhs.kind_name(),
        right: rhs.kind_name(),
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

fn check_lengths(left: usize, right: usize) -> Result<(), EngineError> {
    if left == right {
        Ok(())
    } else {
        Err(EngineError::LengthMismatch { left, right })
    }
}

/// Checked difference with missing-value propagation.
fn diff_ns(a: i64, b: i64) -> Result<i64, EngineError> {
    if a == NAT || b == NAT {
        return Ok(NAT);
    }
    a.checked_sub(b)
        .filter(|v| *v != NAT)
        .ok_or(EngineError::Overflow {
            op: "instant - instant",
        })
}

/// All-missing datetime sequence shaped like `s`, frequency cleared.
fn all_nat(s: &DatetimeSequence) -> Operand {
    Operand::Instants(DatetimeSequence::new(vec![NAT; s.len()], s.zone().cloned()))
}

fn all_nat_durations(len: usize) -> Operand {
    Operand::Durations(DurationSequence::new(vec![NAT; len]))
}

/// Shifts every element by a constant span. A tick-sized frequency survives
/// the shift; an anchored one cannot and is cleared with an advisory.
fn seq_shift(
    s: &DatetimeSequence,
    d: Duration,
    op: &'static str,
) -> Result<Evaluated<Operand>, EngineError> {
    if d.is_missing() {
        return Ok(Evaluated::new(all_nat(s)));
    }
    let mut values = Vec::with_capacity(s.len());
    for &v in s.values() {
        values.push(checked_shift_ns(v, d.nanos(), op)?);
    }
    let out = DatetimeSequence::new(values, s.zone().cloned());
    match s.freq() {
        Some(f) if f.is_tick() => {
            Ok(Evaluated::new(out.with_freq_unchecked(Some(*f)).into()))
        }
        Some(_) => Ok(Evaluated::new(out.into()).advise(Advisory::FrequencyCleared)),
        None => Ok(Evaluated::new(out.into())),
    }
}

/// Elementwise shift by a duration array; the result frequency is whatever
/// the new spacing implies.
fn seq_shift_elementwise(
    s: &DatetimeSequence,
    deltas: &[i64],
    sign: i64,
) -> Result<Evaluated<Operand>, EngineError> {
    check_lengths(s.len(), deltas.len())?;
    let mut values = Vec::with_capacity(s.len());
    for (&v, &d) in s.values().iter().zip(deltas.iter()) {
        if d == NAT {
            values.push(NAT);
        } else {
            values.push(checked_shift_ns(v, sign * d, "sequence + duration array")?);
        }
    }
    let out = DatetimeSequence::new(values, s.zone().cloned()).with_inferred_freq();
    Ok(Evaluated::new(out.into()))
}

fn seq_offset(s: &DatetimeSequence, o: &CalendarOffset) -> Result<Evaluated<Operand>, EngineError> {
    if let Some(step) = o.as_tick() {
        return seq_shift(s, Duration::from_nanos(step), "sequence + offset");
    }
    debug!(offset = ?o, len = s.len(), "calendar offset applied per element");
    let mut values = Vec::with_capacity(s.len());
    for t in s.iter() {
        values.push(o.apply(&t)?.value());
    }
    let out = DatetimeSequence::new(values, s.zone().cloned()).with_inferred_freq();
    Ok(Evaluated::new(out.into()).advise(Advisory::PerElementFallback))
}

fn seq_offsets(
    s: &DatetimeSequence,
    offsets: &[CalendarOffset],
    negate: bool,
) -> Result<Evaluated<Operand>, EngineError> {
    check_lengths(s.len(), offsets.len())?;
    debug!(len = s.len(), "offset array applied per element");
    let mut values = Vec::with_capacity(s.len());
    for (t, o) in s.iter().zip(offsets.iter()) {
        let o = if negate {
            o.negated().ok_or(EngineError::Overflow {
                op: "sequence - offset array",
            })?
        } else {
            *o
        };
        values.push(o.apply(&t)?.value());
    }
    let out = DatetimeSequence::new(values, s.zone().cloned()).with_inferred_freq();
    Ok(Evaluated::new(out.into()).advise(Advisory::PerElementFallback))
}

/// Integer arithmetic shifts by whole frequency steps; only a tick-sized
/// frequency defines a step, so anything else is rejected.
fn seq_int(s: &DatetimeSequence, n: i64) -> Result<Evaluated<Operand>, EngineError> {
    let step = s
        .freq()
        .and_then(|f| f.as_tick())
        .ok_or(EngineError::NullFrequency)?;
    let delta = step.checked_mul(n).ok_or(EngineError::Overflow {
        op: "sequence + integer",
    })?;
    seq_shift(s, Duration::from_nanos(delta), "sequence + integer")
}

fn seq_ints(
    s: &DatetimeSequence,
    counts: &[i64],
    sign: i64,
) -> Result<Evaluated<Operand>, EngineError> {
    let freq = *s.freq().ok_or(EngineError::NullFrequency)?;
    check_lengths(s.len(), counts.len())?;
    match freq.as_tick() {
        Some(step) => {
            let mut values = Vec::with_capacity(s.len());
            for (&v, &k) in s.values().iter().zip(counts.iter()) {
                let delta = k
                    .checked_mul(sign)
                    .and_then(|k| k.checked_mul(step))
                    .ok_or(EngineError::Overflow {
                        op: "sequence + integer array",
                    })?;
                values.push(checked_shift_ns(v, delta, "sequence + integer array")?);
            }
            let out = DatetimeSequence::new(values, s.zone().cloned()).with_inferred_freq();
            Ok(Evaluated::new(out.into()))
        }
        None => {
            let mut values = Vec::with_capacity(s.len());
            for (t, &k) in s.iter().zip(counts.iter()) {
                let scaled = k
                    .checked_mul(sign)
                    .and_then(|k| freq.scaled(k))
                    .ok_or(EngineError::Overflow {
                        op: "sequence + integer array",
                    })?;
                values.push(scaled.apply(&t)?.value());
            }
            let out = DatetimeSequence::new(values, s.zone().cloned()).with_inferred_freq();
            Ok(Evaluated::new(out.into()).advise(Advisory::PerElementFallback))
        }
    }
}

/// Elementwise instant difference producing a duration sequence.
fn seq_sub_values(
    values: &[i64],
    zone: Option<&Zone>,
    rhs: Rhs<'_>,
) -> Result<Evaluated<Operand>, EngineError> {
    if let One(t) = &rhs {
        check_zones(zone, t.zone())?;
    }
    let mut out = Vec::with_capacity(values.len());
    match rhs {
        One(t) => {
            for &v in values {
                out.push(diff_ns(v, t.value())?);
            }
        }
        Many(bs) => {
            for (&a, &b) in values.iter().zip(bs.iter()) {
                out.push(diff_ns(a, b)?);
            }
        }
    }
    Ok(Evaluated::new(Operand::Durations(DurationSequence::new(out))))
}

fn negate_durations(e: Evaluated<Operand>) -> Evaluated<Operand> {
    e.map(|op| match op {
        Operand::Durations(ds) => Operand::Durations(DurationSequence::new(
            ds.iter().map(|d| d.negated().nanos()).collect(),
        )),
        other => other,
    })
}

fn durations_zip(
    a: &DurationSequence,
    b: &DurationSequence,
    sign: i64,
) -> Result<Evaluated<Operand>, EngineError> {
    check_lengths(a.len(), b.len())?;
    let mut out = Vec::with_capacity(a.len());
    for (x, y) in a.iter().zip(b.iter()) {
        let r = if sign >= 0 {
            x.checked_add(y)?
        } else {
            x.checked_sub(y)?
        };
        out.push(r.nanos());
    }
    Ok(Evaluated::new(Operand::Durations(DurationSequence::new(out))))
}

fn durations_scalar(
    ds: &DurationSequence,
    d: Duration,
    sign: i64,
) -> Result<Evaluated<Operand>, EngineError> {
    let mut out = Vec::with_capacity(ds.len());
    for x in ds.iter() {
        let r = if sign >= 0 {
            x.checked_add(d)?
        } else {
            x.checked_sub(d)?
        };
        out.push(r.nanos());
    }
    Ok(Evaluated::new(Operand::Durations(DurationSequence::new(out))))
}
