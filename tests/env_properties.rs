//! Behavioural properties of the catcher environment

use catcher_env::{Action, CatcherEnv, EnvConfig, Environment, Observation};
use proptest::prelude::*;

const FIELD: i32 = 128;
const REWARDS: [f64; 4] = [0.0, 1.0, -1.0, -5.0];

fn env() -> CatcherEnv {
    CatcherEnv::new(EnvConfig::default()).unwrap()
}

/// Always move to the side of the field the target is not on
fn run_away(obs: &Observation) -> Action {
    if obs.target.x < FIELD / 2 {
        Action::Right
    } else {
        Action::Left
    }
}

/// Keep the paddle centre under the target centre
fn track(obs: &Observation) -> Action {
    let paddle_centre = obs.agent + 12;
    let target_centre = obs.target.x + 3;
    if paddle_centre < target_centre {
        Action::Right
    } else {
        Action::Left
    }
}

#[test]
fn test_three_misses_lose_the_game() {
    let mut env = env();
    let (mut obs, _) = env.reset(Some(0)).unwrap();
    assert_eq!(obs.agent, 64);
    assert_eq!(env.episode().unwrap().agent.y, 121);
    assert_eq!(env.episode().unwrap().lives_left, 3);

    let mut nonzero = Vec::new();
    for step in 1..=129 {
        let t = env.step(run_away(&obs)).unwrap();
        obs = t.observation;
        if t.reward != 0.0 {
            nonzero.push((step, t.reward, t.terminated));
            // A missed target comes straight back at the top
            assert_eq!(obs.target.y, 0);
        }
    }

    assert_eq!(
        nonzero,
        vec![(43, -1.0, false), (86, -1.0, false), (129, -5.0, true)]
    );
    let state = env.episode().unwrap();
    assert_eq!(state.lives_left, 0);
    assert_eq!(state.episode_reward, -7.0);
}

#[test]
fn test_tracking_paddle_catches_first_target() {
    for seed in 0..20 {
        let mut env = env();
        let (mut obs, _) = env.reset(Some(seed)).unwrap();
        let (first_step, reward) = (1..)
            .find_map(|step| {
                let t = env.step(track(&obs)).unwrap();
                obs = t.observation;
                (t.reward != 0.0).then_some((step, t.reward))
            })
            .unwrap();

        assert_eq!(first_step, 39, "seed {seed}");
        assert_eq!(reward, 1.0);
        assert_eq!(obs.target.y, 0);
        assert_eq!(env.episode().unwrap().lives_left, 3);
    }
}

#[test]
fn test_second_reset_appends_previous_total() {
    let mut env = env();
    let (mut obs, _) = env.reset(Some(5)).unwrap();
    for _ in 0..90 {
        let t = env.step(run_away(&obs)).unwrap();
        obs = t.observation;
    }
    let total = env.episode().unwrap().episode_reward;
    assert_eq!(total, -2.0);

    env.reset(None).unwrap();
    assert_eq!(env.session().rewards(), &[-2.0]);
    assert_eq!(env.episode().unwrap().episode_reward, 0.0);

    // A reset with no steps still closes out the (empty) episode
    env.reset(None).unwrap();
    assert_eq!(env.session().rewards(), &[-2.0, 0.0]);
    assert_eq!(env.session().episodes(), 3);
}

#[test]
fn test_same_seed_same_spawns() {
    let mut a = env();
    let mut b = env();
    let (obs_a, _) = a.reset(Some(77)).unwrap();
    let (obs_b, _) = b.reset(Some(77)).unwrap();
    assert_eq!(obs_a, obs_b);

    // Reseeding an env that has already played reproduces the first episode
    let (mut obs, _) = a.reset(Some(77)).unwrap();
    assert_eq!(obs, obs_b);
    for _ in 0..200 {
        let t = a.step(run_away(&obs)).unwrap();
        obs = t.observation;
        if t.terminated {
            break;
        }
    }
    let (again, _) = a.reset(Some(77)).unwrap();
    assert_eq!(again, obs_b);
}

#[test]
fn test_invalid_action_index() {
    let err = Action::try_from(2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid action 2: expected 0 (left) or 1 (right)"
    );
}

/// Play `actions`, resetting whenever an episode terminates
fn play(seed: u64, actions: &[bool]) -> Vec<(Observation, f64, bool, u32)> {
    let mut env = env();
    env.reset(Some(seed)).unwrap();
    let mut trace = Vec::with_capacity(actions.len());
    for &right in actions {
        let action = if right { Action::Right } else { Action::Left };
        let t = env.step(action).unwrap();
        let lives = env.episode().unwrap().lives_left;
        trace.push((t.observation, t.reward, t.terminated, lives));
        if t.terminated {
            env.reset(None).unwrap();
        }
    }
    trace
}

proptest! {
    #[test]
    fn prop_positions_stay_in_field(
        seed in any::<u64>(),
        actions in prop::collection::vec(any::<bool>(), 1..400),
    ) {
        let mut env = env();
        env.reset(Some(seed)).unwrap();
        let space = env.observation_space();
        for &right in &actions {
            let action = if right { Action::Right } else { Action::Left };
            let t = env.step(action).unwrap();
            prop_assert!(space.contains(&t.observation));
            let state = env.episode().unwrap();
            prop_assert!((0..=FIELD).contains(&state.agent.x));
            prop_assert_eq!(state.agent.y, 121);
            if t.terminated {
                env.reset(None).unwrap();
            }
        }
    }

    #[test]
    fn prop_same_seed_same_trajectory(
        seed in any::<u64>(),
        actions in prop::collection::vec(any::<bool>(), 1..300),
    ) {
        prop_assert_eq!(play(seed, &actions), play(seed, &actions));
    }

    #[test]
    fn prop_reward_is_exactly_one_outcome(
        seed in any::<u64>(),
        actions in prop::collection::vec(any::<bool>(), 1..400),
    ) {
        for (_, reward, terminated, lives) in play(seed, &actions) {
            prop_assert!(REWARDS.contains(&reward), "reward {}", reward);
            prop_assert_eq!(terminated, lives == 0);
            if terminated {
                prop_assert_eq!(reward, -5.0);
            }
        }
    }

    #[test]
    fn prop_scored_steps_respawn_target(
        seed in any::<u64>(),
        actions in prop::collection::vec(any::<bool>(), 40..400),
    ) {
        let (lo, hi) = env().geometry().spawn_x_range();
        for (obs, reward, _, _) in play(seed, &actions) {
            if reward != 0.0 {
                prop_assert_eq!(obs.target.y, 0);
                prop_assert!(obs.target.x >= lo && obs.target.x <= hi);
            }
        }
    }
}
