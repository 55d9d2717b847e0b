//! Per-spawner release timing for a composed wave.

use std::collections::VecDeque;

use pcg_towers_core::Enemy;

/// Intervals derived from a wave duration and its group sizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveTiming {
    group_interval: f32,
    enemy_intervals: Vec<f32>,
}

impl WaveTiming {
    /// Splits `duration` evenly between the non-empty groups, then each group
    /// slot evenly between the group's enemies.
    #[must_use]
    pub fn for_groups(duration: f32, sizes: &[usize]) -> Self {
        let non_empty: Vec<usize> = sizes.iter().copied().filter(|size| *size > 0).collect();
        if non_empty.is_empty() {
            return Self {
                group_interval: 0.0,
                enemy_intervals: Vec::new(),
            };
        }
        let group_interval = duration / non_empty.len() as f32;
        let enemy_intervals = non_empty
            .iter()
            .map(|size| group_interval / *size as f32)
            .collect();
        Self {
            group_interval,
            enemy_intervals,
        }
    }

    /// Time allotted to each group.
    #[must_use]
    pub const fn group_interval(&self) -> f32 {
        self.group_interval
    }

    /// Time between enemies, one entry per non-empty group.
    #[must_use]
    pub fn enemy_intervals(&self) -> &[f32] {
        &self.enemy_intervals
    }
}

/// Ordered enemy groups waiting to be released by one spawner.
///
/// Groups are released one after another, each owning an equal slot of the
/// wave. Within a slot the group's enemies are spaced evenly, the first one
/// leaving as soon as the slot opens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnerSchedule {
    groups: VecDeque<VecDeque<Enemy>>,
    timing: WaveTiming,
    current_group: usize,
    group_timer: f32,
    enemy_timer: f32,
}

impl SpawnerSchedule {
    /// Creates an idle schedule holding `groups`.
    #[must_use]
    pub fn new(groups: Vec<Vec<Enemy>>) -> Self {
        Self {
            groups: groups.into_iter().map(VecDeque::from).collect(),
            ..Self::default()
        }
    }

    /// Replaces the queued groups; timing must be armed again afterwards.
    pub fn replace_groups(&mut self, groups: Vec<Vec<Enemy>>) {
        self.groups = groups.into_iter().map(VecDeque::from).collect();
        self.timing = WaveTiming::default();
        self.current_group = 0;
    }

    /// Arms the timers for a wave lasting `duration` seconds.
    ///
    /// Empty groups are dropped. The first enemy is due immediately and the
    /// first group slot closes after one group interval.
    pub fn update_wave_timing(&mut self, duration: f32) {
        self.groups.retain(|group| !group.is_empty());
        self.timing = WaveTiming::for_groups(duration, &self.group_sizes());
        self.current_group = 0;
        self.group_timer = self.timing.group_interval();
        self.enemy_timer = 0.0;
    }

    /// Advances the clocks by `dt`, pushing every enemy that became due.
    pub fn tick(&mut self, dt: f32, spawned: &mut Vec<Enemy>) {
        let mut remaining = dt.max(0.0);
        loop {
            let Some(group) = self.groups.front_mut() else {
                return;
            };

            if group.is_empty() {
                if self.group_timer > remaining {
                    self.group_timer -= remaining;
                    return;
                }
                remaining -= self.group_timer.max(0.0);
                let _ = self.groups.pop_front();
                self.current_group += 1;
                self.group_timer = self.timing.group_interval();
                self.enemy_timer = 0.0;
                continue;
            }

            if self.enemy_timer > remaining {
                self.enemy_timer -= remaining;
                self.group_timer -= remaining;
                return;
            }

            remaining -= self.enemy_timer;
            self.group_timer -= self.enemy_timer;
            if let Some(enemy) = group.pop_front() {
                spawned.push(enemy);
            }
            self.enemy_timer = self.enemy_interval();
        }
    }

    /// Reports whether every queued enemy has been released.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.groups.iter().all(VecDeque::is_empty)
    }

    /// Enemies still waiting to be released.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.groups.iter().map(VecDeque::len).sum()
    }

    /// Sizes of the groups that have not finished their slot.
    #[must_use]
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(VecDeque::len).collect()
    }

    /// Enemies still queued, grouped in release order.
    #[must_use]
    pub fn groups(&self) -> &VecDeque<VecDeque<Enemy>> {
        &self.groups
    }

    /// Intervals the schedule was armed with.
    #[must_use]
    pub fn timing(&self) -> &WaveTiming {
        &self.timing
    }

    /// Time allotted to each group.
    #[must_use]
    pub const fn group_interval(&self) -> f32 {
        self.timing.group_interval()
    }

    /// Time between enemies of the current group.
    #[must_use]
    pub fn enemy_interval(&self) -> f32 {
        self.timing
            .enemy_intervals()
            .get(self.current_group)
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcg_towers_core::{EnemyArchetype, EnemyColor, EnemyShape, EnemyStats};

    fn enemy(health: f32) -> Enemy {
        Enemy {
            archetype: EnemyArchetype::Generic,
            stats: EnemyStats {
                max_health: health,
                speed: 16.0,
                damage: 1.0,
            },
            shape: EnemyShape::Circle,
            color: EnemyColor::from_rgb(255, 0, 0),
        }
    }

    #[test]
    fn first_enemy_leaves_immediately() {
        let mut schedule = SpawnerSchedule::new(vec![vec![enemy(1.0), enemy(2.0)]]);
        schedule.update_wave_timing(10.0);
        let mut spawned = Vec::new();

        schedule.tick(0.0, &mut spawned);

        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].stats.max_health, 1.0);
        assert!((schedule.enemy_interval() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let mut schedule = SpawnerSchedule::new(vec![vec![], vec![enemy(1.0)], vec![]]);
        schedule.update_wave_timing(9.0);

        assert_eq!(schedule.group_sizes(), vec![1]);
        assert!((schedule.group_interval() - 9.0).abs() < 1e-6);
    }

    #[test]
    fn exhausted_schedule_is_inert() {
        let mut schedule = SpawnerSchedule::new(Vec::new());
        schedule.update_wave_timing(30.0);
        let mut spawned = Vec::new();

        schedule.tick(5.0, &mut spawned);

        assert!(spawned.is_empty());
        assert!(schedule.is_finished());
    }

    #[test]
    fn armed_intervals_conserve_the_wave_duration() {
        let sizes = [4, 0, 2, 5];
        let mut schedule = SpawnerSchedule::new(
            sizes
                .iter()
                .map(|size| (0..*size).map(|index| enemy(index as f32)).collect())
                .collect(),
        );
        schedule.update_wave_timing(45.0);

        let groups = schedule.group_sizes();
        assert_eq!(groups, vec![4, 2, 5]);
        let slots = schedule.group_interval() * groups.len() as f32;
        assert!((slots - 45.0).abs() < 1e-4, "group slots cover {slots}");

        let intervals = schedule.timing().enemy_intervals().to_vec();
        assert_eq!(intervals.len(), groups.len());
        for (interval, size) in intervals.iter().zip(&groups) {
            let group_time = interval * *size as f32;
            assert!((group_time - schedule.group_interval()).abs() < 1e-4);
        }

        let mut spawned = Vec::new();
        let mut seen = Vec::new();
        let mut clock = 0.0;
        while clock < 46.0 {
            seen.push(schedule.enemy_interval());
            schedule.tick(0.25, &mut spawned);
            clock += 0.25;
        }
        assert_eq!(spawned.len(), 11);
        for interval in &intervals {
            assert!(seen.iter().any(|current| (current - interval).abs() < 1e-6));
        }
    }

    #[test]
    fn group_order_is_preserved() {
        let mut schedule = SpawnerSchedule::new(vec![
            vec![enemy(1.0), enemy(2.0)],
            vec![enemy(3.0)],
        ]);
        schedule.update_wave_timing(4.0);
        let mut spawned = Vec::new();

        schedule.tick(10.0, &mut spawned);

        let order: Vec<f32> = spawned.iter().map(|enemy| enemy.stats.max_health).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
        assert!(schedule.is_finished());
    }
}
