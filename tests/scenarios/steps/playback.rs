//! Playback step definitions.

use cucumber::{then, when};
use rbstep::Playback;

use super::tree::TreeWorld;

#[when("I start playing back the last trace")]
fn when_start_playback(world: &mut TreeWorld) {
    world.playback = Some(Playback::new(world.trace().clone()));
}

#[when(expr = "I advance the playback {int} time(s)")]
fn when_advance(world: &mut TreeWorld, times: usize) {
    let playback = world.playback.as_mut().expect("Playback not started");
    for _ in 0..times {
        playback.advance();
    }
}

#[when("I rewind the playback")]
fn when_rewind(world: &mut TreeWorld) {
    world.playback.as_mut().expect("Playback not started").rewind();
}

#[then(expr = "the playback message is {string}")]
fn then_playback_message(world: &mut TreeWorld, message: String) {
    let playback = world.playback.as_ref().expect("Playback not started");
    assert_eq!(playback.message(), message);
}

#[then(expr = "the playback shows root {int}")]
fn then_playback_root(world: &mut TreeWorld, value: i64) {
    let playback = world.playback.as_ref().expect("Playback not started");
    let shown = playback.view_or(world.tree.view());
    assert_eq!(shown.root().map(|root| *root.value()), Some(value));
}

#[then("the playback is finished")]
fn then_playback_finished(world: &mut TreeWorld) {
    let playback = world.playback.as_ref().expect("Playback not started");
    assert!(playback.is_finished());
}
