//! Manual rotation step definitions.

use cucumber::{then, when};
use rbstep_tree::TreeError;

use super::tree::TreeWorld;

#[when(expr = "I rotate {int} {word}")]
fn when_rotate(world: &mut TreeWorld, value: i64, direction: String) {
    let id = world.node(value).id();
    world.capture_before();
    let result = match direction.as_str() {
        "left" => world.tree.rotate_left(id),
        "right" => world.tree.rotate_right(id),
        other => panic!("Unknown direction {other:?}"),
    };
    world.last_error = result.err();
}

#[then("the rotation succeeds")]
fn then_rotation_succeeds(world: &mut TreeWorld) {
    assert_eq!(world.last_error, None);
}

#[then(expr = "the rotation is rejected as invalid for {int}")]
fn then_rotation_rejected(world: &mut TreeWorld, value: i64) {
    let expected = world.node(value).id();
    match &world.last_error {
        Some(TreeError::InvalidRotation { node, .. }) => assert_eq!(*node, expected),
        other => panic!("Expected InvalidRotation, got {other:?}"),
    }
}
