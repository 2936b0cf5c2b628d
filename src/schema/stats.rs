use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest value any stat can hold.
pub const STAT_MIN: i32 = 0;
/// Highest value any stat can hold.
pub const STAT_MAX: i32 = 100;
/// Value every stat starts a playthrough with.
pub const STAT_BASELINE: i32 = 50;

/// The three tracked stat axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Reputation,
    Money,
    Environment,
}

impl Stat {
    /// All axes in display order.
    pub const ALL: [Stat; 3] = [Stat::Reputation, Stat::Money, Stat::Environment];

    /// Human-readable label, used by stat bars and consequence previews.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reputation => "Reputation",
            Self::Money => "Money",
            Self::Environment => "Environment",
        }
    }

    /// Lowercase key, matching the field names in authored data.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Reputation => "reputation",
            Self::Money => "money",
            Self::Environment => "environment",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three player stats, each held within `[STAT_MIN, STAT_MAX]`.
///
/// Fields are private so the range can only be reached through clamping
/// constructors and `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameStats {
    reputation: i32,
    money: i32,
    environment: i32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::baseline()
    }
}

impl GameStats {
    /// Build stats from raw values, clamping each into range.
    pub fn new(reputation: i32, money: i32, environment: i32) -> Self {
        Self {
            reputation: clamp_stat(i64::from(reputation)),
            money: clamp_stat(i64::from(money)),
            environment: clamp_stat(i64::from(environment)),
        }
    }

    /// Every axis set to the same (clamped) value.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value)
    }

    /// 50/50/50.
    pub fn baseline() -> Self {
        Self::uniform(STAT_BASELINE)
    }

    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    pub fn money(&self) -> i32 {
        self.money
    }

    pub fn environment(&self) -> i32 {
        self.environment
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Reputation => self.reputation,
            Stat::Money => self.money,
            Stat::Environment => self.environment,
        }
    }

    /// Apply a set of consequences, returning the new stats.
    ///
    /// Total over all inputs: each axis becomes `clamp(old + delta, 0, 100)`
    /// and an axis with no delta passes through unchanged.
    pub fn apply(&self, consequences: &Consequences) -> GameStats {
        let shift = |old: i32, delta: i32| clamp_stat(i64::from(old) + i64::from(delta));
        GameStats {
            reputation: shift(self.reputation, consequences.reputation),
            money: shift(self.money, consequences.money),
            environment: shift(self.environment, consequences.environment),
        }
    }
}

// i64 keeps `old + delta` from overflowing before the clamp.
fn clamp_stat(value: i64) -> i32 {
    value.clamp(i64::from(STAT_MIN), i64::from(STAT_MAX)) as i32
}

/// Sparse stat deltas attached to a choice. Omitted axes default to zero,
/// and zero means "no consequence on this axis".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Consequences {
    #[serde(default)]
    pub reputation: i32,
    #[serde(default)]
    pub money: i32,
    #[serde(default)]
    pub environment: i32,
}

impl Consequences {
    pub fn delta(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Reputation => self.reputation,
            Stat::Money => self.money,
            Stat::Environment => self.environment,
        }
    }

    /// Returns true if no axis would change.
    pub fn is_empty(&self) -> bool {
        Stat::ALL.iter().all(|stat| self.delta(*stat) == 0)
    }

    /// The non-zero deltas in display order, for choice-button previews.
    pub fn preview(&self) -> Vec<StatDelta> {
        Stat::ALL
            .iter()
            .map(|stat| StatDelta {
                stat: *stat,
                delta: self.delta(*stat),
            })
            .filter(|d| d.delta != 0)
            .collect()
    }
}

/// One signed change to one stat, rendered as e.g. `+20 Money`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatDelta {
    pub stat: Stat,
    pub delta: i32,
}

impl fmt::Display for StatDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} {}", self.delta, self.stat.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_fifty() {
        let stats = GameStats::baseline();
        assert_eq!(stats.reputation(), 50);
        assert_eq!(stats.money(), 50);
        assert_eq!(stats.environment(), 50);
        assert_eq!(GameStats::default(), stats);
    }

    #[test]
    fn new_clamps_out_of_range_values() {
        let stats = GameStats::new(-30, 250, 100);
        assert_eq!(stats, GameStats::new(0, 100, 100));
    }

    #[test]
    fn apply_adds_deltas() {
        let stats = GameStats::baseline().apply(&Consequences {
            reputation: -5,
            money: 20,
            environment: -10,
        });
        assert_eq!(stats.reputation(), 45);
        assert_eq!(stats.money(), 70);
        assert_eq!(stats.environment(), 40);
    }

    #[test]
    fn repeated_negative_deltas_saturate_at_zero() {
        let hit = Consequences {
            environment: -25,
            ..Consequences::default()
        };
        let mut stats = GameStats::baseline();
        for _ in 0..3 {
            stats = stats.apply(&hit);
        }
        assert_eq!(stats.environment(), 0);
        assert_eq!(stats.reputation(), 50);
        assert_eq!(stats.money(), 50);
    }

    #[test]
    fn extreme_deltas_stay_in_range() {
        let extremes = [i32::MIN, -101, -1, 0, 1, 101, i32::MAX];
        for start in [0, 1, 50, 99, 100] {
            for delta in extremes {
                let stats = GameStats::uniform(start).apply(&Consequences {
                    reputation: delta,
                    money: delta,
                    environment: delta,
                });
                for stat in Stat::ALL {
                    let value = stats.get(stat);
                    assert!(
                        (STAT_MIN..=STAT_MAX).contains(&value),
                        "{} out of range: {} (start {}, delta {})",
                        stat,
                        value,
                        start,
                        delta
                    );
                }
            }
        }
    }

    #[test]
    fn empty_consequences_pass_through() {
        let stats = GameStats::new(12, 34, 56);
        assert_eq!(stats.apply(&Consequences::default()), stats);
        assert!(Consequences::default().is_empty());
    }

    #[test]
    fn preview_skips_zero_axes() {
        let c = Consequences {
            reputation: 15,
            money: 0,
            environment: -10,
        };
        let preview = c.preview();
        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0].to_string(), "+15 Reputation");
        assert_eq!(preview[1].to_string(), "-10 Environment");
    }

    #[test]
    fn consequences_parse_sparse_ron() {
        let c: Consequences = ron::from_str("(money: 20)").unwrap();
        assert_eq!(c.money, 20);
        assert_eq!(c.reputation, 0);
        assert_eq!(c.environment, 0);
    }
}
