//! Acceptance scenarios for rbstep using Cucumber.
//!
//! ```bash
//! cargo test --test scenarios
//! ```

mod steps;

use cucumber::World;
use steps::tree::TreeWorld;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    TreeWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/scenarios/features")
        .await;
}
