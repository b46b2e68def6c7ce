use ordered_float::OrderedFloat;

const MAX_TICKS: f64 = 10_000.0;

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;

/// Candidate time steps in milliseconds, from one second to one (approximate) year.
const TIME_STEPS_MS: &[f64] = &[
    SECOND_MS,
    2.0 * SECOND_MS,
    5.0 * SECOND_MS,
    15.0 * SECOND_MS,
    30.0 * SECOND_MS,
    MINUTE_MS,
    5.0 * MINUTE_MS,
    15.0 * MINUTE_MS,
    30.0 * MINUTE_MS,
    HOUR_MS,
    3.0 * HOUR_MS,
    6.0 * HOUR_MS,
    12.0 * HOUR_MS,
    DAY_MS,
    2.0 * DAY_MS,
    7.0 * DAY_MS,
    30.0 * DAY_MS,
    91.0 * DAY_MS,
    365.0 * DAY_MS,
];

/// Returns "nice" tick values covering `[min, max]` with roughly `count` steps.
///
/// The returned ticks stay inside the domain; the domain itself is not widened.
pub fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let Some((min, max)) = ordered_domain(min, max) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let step = nice_step((max - min) / count as f64);
    ticks_with_step(min, max, step)
}

/// Like [`nice_ticks`] but snaps the step to calendar-friendly intervals when
/// the domain is expressed in epoch milliseconds.
pub fn nice_time_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let Some((min, max)) = ordered_domain(min, max) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let raw = (max - min) / count as f64;
    let step = if raw < SECOND_MS {
        nice_step(raw)
    } else if raw > 365.0 * DAY_MS {
        nice_step(raw / (365.0 * DAY_MS)) * 365.0 * DAY_MS
    } else {
        TIME_STEPS_MS
            .iter()
            .copied()
            .find(|candidate| *candidate >= raw)
            .unwrap_or(365.0 * DAY_MS)
    };
    ticks_with_step(min, max, step)
}

/// Extends `[min, max]` outward to the nearest nice step boundaries.
pub fn nice_domain(min: f64, max: f64, count: usize) -> (f64, f64) {
    let Some((lo, hi)) = ordered_domain(min, max) else {
        return (min, max);
    };
    if lo == hi || count == 0 {
        return (lo, hi);
    }
    let step = nice_step((hi - lo) / count as f64);
    if step == 0.0 {
        return (lo, hi);
    }
    ((lo / step).floor() * step, (hi / step).ceil() * step)
}

/// Sorts explicit tick values and removes duplicates and non-finite entries.
pub fn normalize_tick_values(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    out.sort_by_key(|v| OrderedFloat(*v));
    out.dedup_by_key(|v| OrderedFloat(*v));
    out
}

/// Smallest positive spacing between consecutive values.
pub fn min_spacing(values: &[f64]) -> f64 {
    let mut best = f64::INFINITY;
    for pair in values.windows(2) {
        let step = (pair[1] - pair[0]).abs();
        if step.is_finite() && step > 0.0 {
            best = best.min(step);
        }
    }
    if best.is_finite() { best } else { 0.0 }
}

fn ordered_domain(min: f64, max: f64) -> Option<(f64, f64)> {
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    Some(if min <= max { (min, max) } else { (max, min) })
}

fn ticks_with_step(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() {
        return vec![min, max];
    }
    let start = (min / step).ceil();
    let stop = (max / step).floor();
    let count = (stop - start).round();
    if !count.is_finite() || count < 0.0 {
        return vec![min, max];
    }
    let count = count.min(MAX_TICKS) as u64;
    (0..=count)
        .map(|i| clean_float((start + i as f64) * step, step))
        .collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

// Removes accumulation noise such as 0.30000000000000004.
fn clean_float(value: f64, step: f64) -> f64 {
    let decimals = (-step.log10().floor()).clamp(0.0, 15.0) as i32 + 1;
    let factor = 10_f64.powi(decimals);
    let cleaned = (value * factor).round() / factor;
    if cleaned == 0.0 { 0.0 } else { cleaned }
}

#[cfg(test)]
mod tests {
    use super::{min_spacing, nice_domain, nice_ticks, nice_time_ticks, normalize_tick_values};

    #[test]
    fn nice_ticks_stay_inside_domain() {
        let ticks = nice_ticks(-0.7, 3.29, 6);
        assert_eq!(ticks, vec![-0.5, 0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn nice_ticks_handle_reversed_and_degenerate_domains() {
        assert_eq!(nice_ticks(10.0, 0.0, 2), vec![0.0, 5.0, 10.0]);
        assert_eq!(nice_ticks(4.0, 4.0, 5), vec![4.0]);
        assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
    }

    #[test]
    fn nice_domain_extends_to_step_boundaries() {
        assert_eq!(nice_domain(0.3, 97.0, 10), (0.0, 100.0));
    }

    #[test]
    fn time_ticks_snap_to_hours() {
        let hour = 3_600_000.0;
        let ticks = nice_time_ticks(0.0, 12.0 * hour, 4);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[1], 3.0 * hour);
    }

    #[test]
    fn explicit_tick_values_are_sorted_and_deduplicated() {
        let out = normalize_tick_values(&[3.0, 1.0, f64::NAN, 3.0, 2.0]);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
        assert_eq!(min_spacing(&out), 1.0);
        assert_eq!(min_spacing(&[1.0]), 0.0);
    }
}
