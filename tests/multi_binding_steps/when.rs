//! When steps for multi-binding resolution BDD scenarios.

use std::sync::Arc;

use multibind::multi_binding::domain::ResolutionScope;
use rstest_bdd_macros::when;

use super::world::{Logger, Metrics, ResolutionWorld};

#[when("all logging implementations are resolved")]
fn resolve_loggers(world: &mut ResolutionWorld) {
    world.resolved = world.registry.resolve::<dyn Logger>();
}

#[when("all metrics implementations are resolved")]
fn resolve_metrics(world: &mut ResolutionWorld) {
    world.resolved_metrics = Some(world.registry.resolve::<dyn Metrics>());
}

#[when("a logger sequence is requested through the locator")]
fn resolve_through_locator(world: &mut ResolutionWorld) {
    world.via_locator = world
        .locator
        .resolve::<Vec<Arc<dyn Logger>>>(ResolutionScope::Shared);
}
