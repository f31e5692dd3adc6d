//! Insertion and tree-shape step definitions.

use cucumber::{given, then, when, World};
use rbstep::Playback;
use rbstep_tree::{Color, NestedNode, NodeRef, RbTree, RecorderConfig, Trace, TreeError};

/// Test context shared by every scenario.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct TreeWorld {
    pub tree: RbTree<i64>,
    pub last_trace: Option<Trace<i64>>,
    pub last_error: Option<TreeError>,
    /// Shape captured right before the last mutating action.
    pub before: Option<NestedNode<i64>>,
    pub playback: Option<Playback<i64>>,
}

impl TreeWorld {
    fn new() -> Self {
        Self {
            tree: RbTree::new(),
            last_trace: None,
            last_error: None,
            before: None,
            playback: None,
        }
    }

    pub fn trace(&self) -> &Trace<i64> {
        self.last_trace.as_ref().expect("No insert has run yet")
    }

    pub fn node(&self, value: i64) -> NodeRef<'_, i64> {
        self.tree
            .view()
            .find(&value)
            .unwrap_or_else(|| panic!("{value} is not in the tree"))
    }

    pub fn capture_before(&mut self) {
        self.before = self.tree.view().to_nested();
    }
}

pub fn parse_values(list: &str) -> Vec<i64> {
    list.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.parse().expect("Invalid integer in value list"))
        .collect()
}

pub fn parse_color(word: &str) -> Color {
    match word.to_ascii_lowercase().as_str() {
        "red" => Color::Red,
        "black" => Color::Black,
        other => panic!("Unknown color {other:?}"),
    }
}

// --- Given steps ---

#[given("an empty red-black tree")]
fn given_empty_tree(world: &mut TreeWorld) {
    world.tree = RbTree::new();
}

#[given(expr = "a red-black tree containing {string}")]
fn given_tree_containing(world: &mut TreeWorld, values: String) {
    world.tree = parse_values(&values).into_iter().collect();
}

#[given(expr = "the trace recorder keeps at most {int} step(s)")]
fn given_capped_recorder(world: &mut TreeWorld, max_steps: usize) {
    world.tree.set_recorder(RecorderConfig::capped(max_steps));
}

#[given("trace recording is disabled")]
fn given_recording_disabled(world: &mut TreeWorld) {
    world.tree.set_recorder(RecorderConfig::disabled());
}

// --- When steps ---

#[when(expr = "I insert {int}")]
fn when_insert(world: &mut TreeWorld, value: i64) {
    world.capture_before();
    world.last_trace = Some(world.tree.insert(value));
}

#[when(expr = "I insert the values {string}")]
fn when_insert_values(world: &mut TreeWorld, values: String) {
    for value in parse_values(&values) {
        world.capture_before();
        world.last_trace = Some(world.tree.insert(value));
    }
}

// --- Then steps ---

#[then(expr = "the root is {int} and {word}")]
fn then_root_is(world: &mut TreeWorld, value: i64, color: String) {
    let root = world.tree.current_root().expect("Tree is empty");
    assert_eq!(*root.value(), value);
    assert_eq!(root.color(), parse_color(&color));
}

#[then(expr = "the {word} child of {int} is {int} and {word}")]
fn then_child_is(world: &mut TreeWorld, side: String, parent: i64, value: i64, color: String) {
    let parent = world.node(parent);
    let child = match side.as_str() {
        "left" => parent.left(),
        "right" => parent.right(),
        other => panic!("Unknown side {other:?}"),
    }
    .expect("Child is missing");
    assert_eq!(*child.value(), value);
    assert_eq!(child.color(), parse_color(&color));
}

#[then(expr = "the tree holds {int} value(s)")]
fn then_tree_holds(world: &mut TreeWorld, count: usize) {
    assert_eq!(world.tree.len(), count);
}

#[then(expr = "the in-order sequence is {string}")]
fn then_in_order_is(world: &mut TreeWorld, values: String) {
    let actual: Vec<i64> = world.tree.view().in_order().into_iter().copied().collect();
    assert_eq!(actual, parse_values(&values));
}

#[then(expr = "the tree is a valid red-black tree with black height {int}")]
fn then_valid_with_black_height(world: &mut TreeWorld, black_height: usize) {
    assert_eq!(world.tree.validate(), Ok(black_height));
}

#[then("no red node has a red child")]
fn then_no_red_red(world: &mut TreeWorld) {
    for node in world.tree.view().iter() {
        if node.is_red() {
            let mut children = node.left().into_iter().chain(node.right());
            assert!(children.all(|child| child.is_black()), "red {} has a red child", node.value());
        }
    }
    assert!(world.tree.validate().is_ok());
}

#[then("the tree is unchanged")]
fn then_tree_unchanged(world: &mut TreeWorld) {
    assert_eq!(world.tree.view().to_nested(), world.before);
}

#[then(expr = "the trace has {int} step(s)")]
fn then_trace_has_steps(world: &mut TreeWorld, count: usize) {
    assert_eq!(world.trace().len(), count);
}

#[then(expr = "step {int} of the trace says {string}")]
fn then_step_says(world: &mut TreeWorld, position: usize, message: String) {
    let step = world
        .trace()
        .get(position - 1)
        .unwrap_or_else(|| panic!("Trace has no step {position}"));
    assert_eq!(step.message(), message);
}

#[then(expr = "the trace dropped {int} step(s)")]
fn then_trace_dropped(world: &mut TreeWorld, count: usize) {
    assert_eq!(world.trace().dropped(), count);
}

#[then("the last step shows the final tree")]
fn then_last_step_is_final(world: &mut TreeWorld) {
    let last = world.trace().last().expect("Trace is empty");
    assert_eq!(last.tree().to_nested(), world.tree.view().to_nested());
}

#[then(expr = "the first step shows {int} as a red leaf under {int}")]
fn then_first_step_shows_leaf(world: &mut TreeWorld, value: i64, parent: i64) {
    let first = world.trace().first().expect("Trace is empty");
    let node = first.tree().find(&value).expect("Value missing from snapshot");
    assert!(node.is_red());
    assert!(node.left().is_none() && node.right().is_none());
    assert_eq!(node.parent().map(|p| *p.value()), Some(parent));
}
