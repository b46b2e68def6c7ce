use crate::axis::TickDimension;

/// Whether any label overlaps the label `skip` positions after it.
///
/// `dims` must be sorted along the axis. A pair collides when the first label's
/// end plus `gap` passes the second label's start.
#[must_use]
pub fn has_collision(dims: &[TickDimension], skip: usize, gap: f64) -> bool {
    colliding_pairs(dims, skip, gap).next().is_some()
}

#[must_use]
pub fn collision_count(dims: &[TickDimension], skip: usize, gap: f64) -> usize {
    colliding_pairs(dims, skip, gap).count()
}

fn colliding_pairs(
    dims: &[TickDimension],
    skip: usize,
    gap: f64,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    let skip = skip.max(1);
    (0..dims.len().saturating_sub(skip))
        .filter(move |&i| dims[i].end + gap > dims[i + skip].start)
        .map(move |i| (i, i + skip))
}
