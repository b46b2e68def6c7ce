use serde::{Deserialize, Serialize};

/// How colliding horizontal tick labels were made legible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LabelStrategy {
    /// Labels fit as laid out.
    None,
    Wrap,
    /// Two rows; `wrapped` is set when wrapping ran first and stays applied.
    Stagger { wrapped: bool },
    Rotate { angle_deg: f64 },
}

/// Which fallbacks are enabled on the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyFlags {
    pub wrap: bool,
    pub stagger: bool,
    pub rotate_deg: f64,
}

/// Resolver for horizontal tick label collisions.
///
/// Each step consumes the collision result of the layout produced by the
/// current state. `Resolved` and `Rotated` are terminal; rotation is accepted
/// even if labels still overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolverState {
    Initial,
    WrapAttempted,
    StaggerAttempted { wrapped: bool },
    Resolved(LabelStrategy),
    Rotated { angle_deg: f64 },
}

impl ResolverState {
    #[must_use]
    pub fn next(self, flags: StrategyFlags, collision: bool) -> Self {
        match self {
            Self::Initial if !collision => Self::Resolved(LabelStrategy::None),
            Self::Initial if flags.wrap => Self::WrapAttempted,
            Self::Initial => Self::after_wrap(flags, false),
            Self::WrapAttempted if !collision => Self::Resolved(LabelStrategy::Wrap),
            Self::WrapAttempted => Self::after_wrap(flags, true),
            Self::StaggerAttempted { wrapped } if !collision => {
                Self::Resolved(LabelStrategy::Stagger { wrapped })
            }
            Self::StaggerAttempted { .. } => Self::Rotated {
                angle_deg: flags.rotate_deg,
            },
            terminal @ (Self::Resolved(_) | Self::Rotated { .. }) => terminal,
        }
    }

    fn after_wrap(flags: StrategyFlags, wrapped: bool) -> Self {
        if flags.stagger {
            Self::StaggerAttempted { wrapped }
        } else {
            Self::Rotated {
                angle_deg: flags.rotate_deg,
            }
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Rotated { .. })
    }

    /// Strategy reported for a terminal state.
    #[must_use]
    pub fn strategy(self) -> Option<LabelStrategy> {
        match self {
            Self::Resolved(strategy) => Some(strategy),
            Self::Rotated { angle_deg } => Some(LabelStrategy::Rotate { angle_deg }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelStrategy, ResolverState, StrategyFlags};

    const ALL: StrategyFlags = StrategyFlags {
        wrap: true,
        stagger: true,
        rotate_deg: 30.0,
    };

    #[test]
    fn no_collision_resolves_immediately() {
        let state = ResolverState::Initial.next(ALL, false);
        assert_eq!(state.strategy(), Some(LabelStrategy::None));
    }

    #[test]
    fn chain_walks_wrap_then_stagger_then_rotate() {
        let s = ResolverState::Initial.next(ALL, true);
        assert_eq!(s, ResolverState::WrapAttempted);
        let s = s.next(ALL, true);
        assert_eq!(s, ResolverState::StaggerAttempted { wrapped: true });
        let s = s.next(ALL, true);
        assert_eq!(s, ResolverState::Rotated { angle_deg: 30.0 });
        assert_eq!(s.next(ALL, true), s);
        assert!(s.is_terminal());
    }

    #[test]
    fn disabled_steps_are_skipped() {
        let only_rotate = StrategyFlags {
            wrap: false,
            stagger: false,
            rotate_deg: 45.0,
        };
        assert_eq!(
            ResolverState::Initial.next(only_rotate, true),
            ResolverState::Rotated { angle_deg: 45.0 }
        );
        let stagger = StrategyFlags {
            stagger: true,
            ..only_rotate
        };
        let s = ResolverState::Initial.next(stagger, true);
        assert_eq!(s, ResolverState::StaggerAttempted { wrapped: false });
        assert_eq!(
            s.next(stagger, false).strategy(),
            Some(LabelStrategy::Stagger { wrapped: false })
        );
    }
}
