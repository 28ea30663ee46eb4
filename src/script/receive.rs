use super::ast::{ActionNode, Condition, EffectNode};
use super::condition::evaluate_condition;
use super::effects::UserStore;
use super::Result;
use super::value::Context;

/// Recursively evaluate an `on_receive` action tree, dispatching effects to
/// the user store.
///
/// Lists evaluate every element in order with no short-circuiting between
/// them. A failed (malformed) condition is contained: the branch is treated
/// as false and evaluation of the rest of the tree continues. Collaborator
/// failures propagate immediately.
pub fn evaluate_receive(node: &ActionNode, ctx: &Context, store: &dyn UserStore) -> Result<()> {
    match node {
        ActionNode::List(items) => {
            for item in items {
                evaluate_receive(item, ctx, store)?;
            }
            Ok(())
        }
        ActionNode::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            if check(condition, ctx) {
                evaluate_receive(then_branch, ctx, store)
            } else if let Some(else_branch) = else_branch {
                evaluate_receive(else_branch, ctx, store)
            } else {
                Ok(())
            }
        }
        ActionNode::Effect(effect) => dispatch_effects(effect, ctx, store),
    }
}

/// Containment policy for malformed conditions: log and treat as false so a
/// bad sub-condition never blocks unrelated effects in the same tree.
fn check(condition: &Condition, ctx: &Context) -> bool {
    match evaluate_condition(condition, ctx) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!("condition treated as false: {}", err);
            false
        }
    }
}

fn dispatch_effects(effect: &EffectNode, ctx: &Context, store: &dyn UserStore) -> Result<()> {
    // Dispatch order within one node is fixed: status before profile.
    if let Some(status) = &effect.user_status {
        store.set_user_status(&ctx.user_id, status)?;
    }
    if let Some(fields) = &effect.set_profile {
        store.set_user_profile(&ctx.user_id, fields)?;
    }
    Ok(())
}
