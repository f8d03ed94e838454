//! Per-frame simulation step
//!
//! Advances the world exactly one frame: jump impulse, integration, steering
//! or world scroll, platform contact, checkpoint claims. The host calls
//! [`step`] once per animation tick; input flags are read as of call time,
//! there is no buffering of missed transitions.

use glam::Vec2;

use super::collision::{PlatformContact, checkpoint_reached, platform_contact};
use super::state::{CHECKPOINT_MESSAGE, GameEvent, WorldState};
use crate::consts::{BACKWARD_THRESHOLD, CHECKPOINT_WIDTH, FORWARD_THRESHOLD};

/// Input flags for a single step.
///
/// `left`/`right` are held-key flags; `jump` is a one-shot impulse the host
/// clears after the step. A host-side "release all" is simply an all-false
/// value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the world by one frame, returning events for the presentation
/// layer.
pub fn step(state: &mut WorldState, input: &StepInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Frozen world after the final claim: input no longer steers, scrolls or
    // jumps for the rest of the session. Integration still runs.
    let input = if state.scroll_active {
        *input
    } else {
        StepInput::default()
    };

    let tuning = state.tuning;
    let viewport = state.viewport;

    if input.jump {
        // Permissive by design: no grounded gate, mid-air jumps included.
        state.player.vel.y -= tuning.jump_impulse;
    }

    state.player.integrate(&viewport, tuning.gravity);

    // Steering inside the soft thresholds; past them, held input translates
    // the world instead of the player, which keeps the player in a central
    // band while the course slides by.
    let forward_limit = viewport.scaled(FORWARD_THRESHOLD);
    let backward_limit = viewport.scaled(BACKWARD_THRESHOLD);
    if input.right && state.player.pos.x < forward_limit {
        state.player.vel.x = tuning.run_speed;
    } else if input.left && state.player.pos.x > backward_limit {
        state.player.vel.x = -tuning.run_speed;
    } else {
        state.player.vel.x = 0.0;
        if state.scroll_active && (input.left || input.right) {
            let shift = if input.right {
                -tuning.scroll_speed
            } else {
                tuning.scroll_speed
            };
            for platform in &mut state.platforms {
                platform.pos.x += shift;
            }
            for checkpoint in state.checkpoints.iter_mut().filter(|c| !c.claimed) {
                checkpoint.pos.x += shift;
            }
        }
    }

    // Platform contact: the first matching rule governs, per platform.
    let player = &mut state.player;
    for platform in &state.platforms {
        match platform_contact(player, platform, &tuning) {
            PlatformContact::Resting => player.vel.y = 0.0,
            PlatformContact::Landing => {
                player.pos.y = platform.top() - player.size.y;
                player.vel.y = tuning.gravity;
            }
            PlatformContact::None => {}
        }
    }

    // Checkpoints claim strictly left to right: each opens only once its
    // predecessor is claimed, re-evaluated within the same step.
    if state.scroll_active {
        let last = state.checkpoints.len() - 1;
        for index in 0..state.checkpoints.len() {
            let gate_open = index == 0 || state.checkpoints[index - 1].claimed;
            let checkpoint = state.checkpoints[index];
            if checkpoint.claimed
                || !gate_open
                || !checkpoint_reached(&state.player, &checkpoint, &tuning)
            {
                continue;
            }

            // Capture the span before claim collapses the geometry.
            let span_start = checkpoint.pos.x;
            let span_end = span_start + viewport.scaled(CHECKPOINT_WIDTH);
            state.checkpoints[index].claim();
            log::debug!("checkpoint {index} claimed at tick {}", state.time_ticks);

            if index == last {
                state.scroll_active = false;
                state.player.vel = Vec2::ZERO;
                events.push(GameEvent::FinalCheckpointReached);
            } else if state.player.pos.x >= span_start && state.player.pos.x <= span_end {
                events.push(GameEvent::CheckpointReached {
                    message: CHECKPOINT_MESSAGE,
                });
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Tuning, Viewport};
    use crate::sim::layout::{LevelLayout, Spawn};
    use proptest::prelude::*;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0)
    }

    fn world_with(platforms: Vec<Spawn>, checkpoints: Vec<Spawn>) -> WorldState {
        let layout = LevelLayout {
            platforms,
            checkpoints,
        };
        WorldState::new(viewport(), Tuning::default(), &layout).unwrap()
    }

    fn default_world() -> WorldState {
        WorldState::new(viewport(), Tuning::default(), &LevelLayout::default_course()).unwrap()
    }

    const RIGHT: StepInput = StepInput {
        left: false,
        right: true,
        jump: false,
    };

    #[test]
    fn test_right_held_translates_player_then_scrolls_world() {
        let mut world = default_world();

        // The spawn x is clamped to one player width on the first step, then
        // the player runs right at 5 px per frame.
        for _ in 0..10 {
            step(&mut world, &RIGHT);
        }
        assert_eq!(world.player.pos.x, 85.0);
        assert_eq!(world.platforms[0].pos.x, 500.0);

        // x = 40 + 5 * (k - 1) reaches the 400 px band edge on step 73; from
        // there on the world scrolls left 5 px per frame instead.
        for _ in 10..100 {
            step(&mut world, &RIGHT);
        }
        assert_eq!(world.player.pos.x, 400.0);
        assert_eq!(world.platforms[0].pos.x, 500.0 - 5.0 * 28.0);
        assert_eq!(world.checkpoints[0].pos.x, 1170.0 - 5.0 * 28.0);
    }

    #[test]
    fn test_left_held_scrolls_world_right_below_threshold() {
        let mut world = default_world();
        let input = StepInput {
            left: true,
            ..Default::default()
        };

        // Spawn clamps to x = 40, below the 100 px backward threshold, so
        // leftward input scrolls the world right instead.
        for _ in 0..10 {
            step(&mut world, &input);
        }
        assert_eq!(world.player.pos.x, 40.0);
        assert_eq!(world.platforms[0].pos.x, 500.0 + 5.0 * 10.0);
        assert_eq!(world.checkpoints[0].pos.x, 1170.0 + 5.0 * 10.0);
    }

    #[test]
    fn test_landing_snaps_exactly_onto_platform_top() {
        let mut world = world_with(vec![Spawn::new(80.0, 100.0)], vec![Spawn::new(5000.0, 80.0)]);
        world.player.pos = glam::Vec2::new(150.0, 90.0);
        world.player.vel = glam::Vec2::new(0.0, 8.0);

        step(&mut world, &StepInput::default());

        assert_eq!(world.player.pos.y, 100.0 - world.player.size.y);
        assert_eq!(world.player.vel.y, world.tuning.gravity);
    }

    #[test]
    fn test_resting_contact_is_idempotent() {
        let mut world = world_with(vec![Spawn::new(80.0, 300.0)], vec![Spawn::new(5000.0, 80.0)]);
        // Bottom exactly on the platform top, vertical velocity cancelled.
        world.player.pos = glam::Vec2::new(150.0, 300.0 - world.player.size.y);
        world.player.vel = glam::Vec2::ZERO;

        for _ in 0..10 {
            step(&mut world, &StepInput::default());
            assert_eq!(world.player.pos.y, 260.0);
            assert_eq!(world.player.vel.y, 0.0);
        }
    }

    #[test]
    fn test_jump_has_no_grounded_gate() {
        let mut world = world_with(vec![Spawn::new(80.0, 300.0)], vec![Spawn::new(5000.0, 80.0)]);
        let jump = StepInput {
            jump: true,
            ..Default::default()
        };

        // Airborne, vertical velocity at one gravity unit: the impulse lifts
        // this frame only, then the gravity reset re-arms.
        world.player.pos = glam::Vec2::new(600.0, 400.0);
        world.player.vel = glam::Vec2::new(0.0, world.tuning.gravity);
        step(&mut world, &jump);
        assert_eq!(world.player.pos.y, 400.0 + 0.5 - 8.0);
        assert_eq!(world.player.vel.y, world.tuning.gravity);

        // Resting on the platform: same impulse, no gate to pass.
        world.player.pos = glam::Vec2::new(150.0, 260.0);
        world.player.vel = glam::Vec2::ZERO;
        step(&mut world, &jump);
        assert_eq!(world.player.pos.y, 252.0);
    }

    #[test]
    fn test_checkpoint_ordering_gate_blocks_out_of_order_claim() {
        // Checkpoint 1 sits at player height; checkpoint 0 is a high post the
        // player cannot currently satisfy.
        let mut world = world_with(
            vec![Spawn::new(80.0, 450.0)],
            vec![Spawn::new(500.0, 0.0), Spawn::new(600.0, 280.0)],
        );
        world.player.pos = glam::Vec2::new(610.0, 300.0);
        world.player.vel = glam::Vec2::ZERO;

        // Checkpoint 1 is geometrically reachable right now...
        assert!(checkpoint_reached(
            &world.player,
            &world.checkpoints[1],
            &world.tuning
        ));

        // ...but never claims while its predecessor is open.
        for _ in 0..5 {
            world.player.pos = glam::Vec2::new(610.0, 300.0);
            world.player.vel = glam::Vec2::ZERO;
            let events = step(&mut world, &StepInput::default());
            assert!(events.is_empty());
            assert!(!world.checkpoints[0].claimed);
            assert!(!world.checkpoints[1].claimed);
        }

        // Claim checkpoint 0; the gate opens and checkpoint 1 follows.
        world.player.pos = glam::Vec2::new(510.0, 20.0);
        world.player.vel = glam::Vec2::ZERO;
        let events = step(&mut world, &StepInput::default());
        assert_eq!(
            events,
            vec![GameEvent::CheckpointReached {
                message: crate::sim::CHECKPOINT_MESSAGE
            }]
        );
        assert!(world.checkpoints[0].claimed);
        assert!(!world.checkpoints[1].claimed);

        world.player.pos = glam::Vec2::new(610.0, 300.0);
        world.player.vel = glam::Vec2::ZERO;
        let events = step(&mut world, &StepInput::default());
        assert_eq!(events, vec![GameEvent::FinalCheckpointReached]);
        assert!(world.checkpoints[1].claimed);
    }

    #[test]
    fn test_final_claim_freezes_world_permanently() {
        let mut world = world_with(vec![Spawn::new(80.0, 450.0)], vec![Spawn::new(500.0, 280.0)]);
        world.player.pos = glam::Vec2::new(510.0, 300.0);
        world.player.vel = glam::Vec2::ZERO;

        let events = step(&mut world, &StepInput::default());
        assert_eq!(events, vec![GameEvent::FinalCheckpointReached]);
        assert!(!world.scroll_active);
        assert_eq!(world.player.vel, glam::Vec2::ZERO);

        // Held input no longer steers or scrolls anything.
        let platform_x = world.platforms[0].pos.x;
        for _ in 0..20 {
            let events = step(&mut world, &RIGHT);
            assert!(events.is_empty());
            assert_eq!(world.player.vel.x, 0.0);
            assert_eq!(world.platforms[0].pos.x, platform_x);
            assert!(!world.scroll_active);
        }
    }

    #[test]
    fn test_claimed_checkpoints_stop_scrolling() {
        let mut world = world_with(
            vec![Spawn::new(80.0, 450.0)],
            vec![Spawn::new(500.0, 280.0), Spawn::new(900.0, 280.0)],
        );
        world.player.pos = glam::Vec2::new(510.0, 300.0);
        world.player.vel = glam::Vec2::ZERO;
        step(&mut world, &StepInput::default());
        assert!(world.checkpoints[0].claimed);

        // Scroll the world; the claimed checkpoint's x must not move.
        let claimed_x = world.checkpoints[0].pos.x;
        world.player.pos.x = 450.0;
        for _ in 0..10 {
            step(&mut world, &RIGHT);
        }
        assert_eq!(world.checkpoints[0].pos.x, claimed_x);
        assert!(world.checkpoints[1].pos.x < 900.0);
    }

    #[test]
    fn test_step_is_deterministic() {
        let mut world_a = default_world();
        let mut world_b = default_world();

        let script = [
            RIGHT,
            RIGHT,
            StepInput {
                jump: true,
                right: true,
                left: false,
            },
            StepInput::default(),
            StepInput {
                left: true,
                ..Default::default()
            },
        ];
        for input in script.iter().cycle().take(500) {
            step(&mut world_a, input);
            step(&mut world_b, input);
        }
        assert_eq!(world_a, world_b);
    }

    proptest! {
        /// The horizontal clamp holds after every step, for any input
        /// sequence.
        #[test]
        fn prop_player_x_always_within_soft_bounds(
            script in proptest::collection::vec(any::<(bool, bool, bool)>(), 1..300)
        ) {
            let mut world = default_world();
            let min_x = world.player.size.x;
            let max_x = world.viewport.width - 2.0 * world.player.size.x;

            for (left, right, jump) in script {
                step(&mut world, &StepInput { left, right, jump });
                prop_assert!(world.player.pos.x >= min_x);
                prop_assert!(world.player.pos.x <= max_x);
            }
        }

        /// Without jump impulses, vertical velocity never accumulates -
        /// after any step it is either cancelled by resting contact or
        /// exactly one gravity unit.
        #[test]
        fn prop_gravity_resets_instead_of_accumulating(
            script in proptest::collection::vec(any::<(bool, bool)>(), 1..200)
        ) {
            let mut world = default_world();
            let gravity = world.tuning.gravity;

            for (left, right) in script {
                step(&mut world, &StepInput { left, right, jump: false });
                prop_assert!(
                    world.player.vel.y == 0.0 || world.player.vel.y == gravity,
                    "vel.y = {}", world.player.vel.y
                );
            }
        }
    }
}
