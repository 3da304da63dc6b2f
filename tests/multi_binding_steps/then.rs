//! Then steps for multi-binding resolution BDD scenarios.

use std::sync::Arc;

use rstest_bdd_macros::then;

use super::world::{Logger, ResolutionWorld};

#[then("resolution returns {count:usize} logger instances")]
fn resolution_returns_count(world: &ResolutionWorld, count: usize) -> Result<(), eyre::Report> {
    if world.resolved.len() != count {
        return Err(eyre::eyre!(
            "expected {count} loggers, got {}",
            world.resolved.len()
        ));
    }
    Ok(())
}

#[then("the file logger is resolved first")]
fn file_logger_first(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    let first = world
        .resolved
        .first()
        .ok_or_else(|| eyre::eyre!("no loggers resolved"))?;
    if first.name() != "file" {
        return Err(eyre::eyre!("expected the file logger, got {}", first.name()));
    }
    Ok(())
}

#[then("only the file logger survives")]
fn only_file_logger_survives(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    let survivors: Vec<&'static str> = world.resolved.iter().map(|logger| logger.name()).collect();
    if survivors != ["file"] {
        return Err(eyre::eyre!("expected only the file logger, got {survivors:?}"));
    }
    Ok(())
}

#[then("no metrics instances are returned")]
fn no_metrics_returned(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    let metrics = world
        .resolved_metrics
        .as_ref()
        .ok_or_else(|| eyre::eyre!("metrics were never resolved"))?;
    if !metrics.is_empty() {
        return Err(eyre::eyre!("expected no metrics, got {}", metrics.len()));
    }
    Ok(())
}

#[then("the locator answer matches direct resolution")]
fn locator_answer_matches_direct(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    let through_locator = world
        .via_locator
        .as_ref()
        .ok_or_else(|| eyre::eyre!("the locator never answered the sequence query"))?;
    let direct = world.registry.resolve::<dyn Logger>();
    if through_locator.len() != direct.len() {
        return Err(eyre::eyre!(
            "locator answered {} loggers, direct resolution returned {}",
            through_locator.len(),
            direct.len()
        ));
    }
    for (ours, theirs) in direct.iter().zip(through_locator.iter()) {
        if !Arc::ptr_eq(ours, theirs) {
            return Err(eyre::eyre!("locator answer diverged from direct resolution"));
        }
    }
    Ok(())
}
