//! Order Lifecycle
//!
//! This demo walks an order through a rule-guarded lifecycle.
//!
//! Key concepts:
//! - Order states (Placed -> Shipped -> Delivered, Cancelled from anywhere)
//! - Trigger-driven transitions with `fire`
//! - Rule violations reported all at once
//! - Administrative jumps with `goto`
//! - Saving the machine definition as JSON
//!
//! Run with: RUST_LOG=stategate=debug cargo run --example order_lifecycle

use stategate::builder::{StateMachineBuilder, TransitionBuilder};
use stategate::core::{Lifecycle, MachineId, StatefulAggregate, Trigger};
use stategate::definition::MachineDefinition;
use stategate::rules::{EvaluationContext, PredicateEvaluator};
use stategate::state_enum;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum OrderState {
        Placed,
        Shipped,
        Delivered,
        Cancelled,
    }
}

struct Order {
    lifecycle: Lifecycle<u64, OrderState>,
    paid: bool,
    shipping_address: Option<String>,
}

impl StatefulAggregate for Order {
    type Id = u64;
    type StateId = OrderState;

    fn lifecycle(&self) -> &Lifecycle<u64, OrderState> {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle<u64, OrderState> {
        &mut self.lifecycle
    }
}

// Pure rule predicates
fn is_paid(ctx: &EvaluationContext<'_, Order>) -> bool {
    ctx.entity().paid
}

fn has_address(ctx: &EvaluationContext<'_, Order>) -> bool {
    ctx.entity().shipping_address.is_some()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Lifecycle Demo ===\n");

    let machine = StateMachineBuilder::new()
        .id("orders")
        .states(OrderState::all_states())
        .transition(
            TransitionBuilder::new()
                .id("ship")
                .from(OrderState::Placed)
                .to(OrderState::Shipped)
                .on("MarkAsShipped")
                .when("Order must be paid.", "is_paid")
                .when("Order must have a shipping address.", "has_address"),
        )?
        .transition(
            TransitionBuilder::new()
                .id("deliver")
                .from(OrderState::Shipped)
                .to(OrderState::Delivered)
                .on("ConfirmDelivery"),
        )?
        .build()?;

    let evaluator = PredicateEvaluator::new()
        .register("is_paid", is_paid)
        .register("has_address", has_address);

    let mut order = Order {
        lifecycle: Lifecycle::new(1001, MachineId::new("orders"), OrderState::Placed),
        paid: false,
        shipping_address: None,
    };

    println!("Order {} starts in {}", order.id(), order.state_id());
    println!(
        "Permitted triggers: {:?}\n",
        machine.permitted_triggers(order.state_id())
    );

    // Rules fail: both violations are reported
    match machine.fire(&Trigger::new("MarkAsShipped"), &mut order, &evaluator, None) {
        Ok(()) => println!("Unexpectedly shipped"),
        Err(e) => println!("Cannot ship yet: {}", e),
    }
    println!("Order is still {}\n", order.state_id());

    order.paid = true;
    order.shipping_address = Some("221B Baker Street".to_string());

    machine.fire(&Trigger::new("MarkAsShipped"), &mut order, &evaluator, None)?;
    println!("After MarkAsShipped: {}", order.state_id());

    // Not relevant in this state: ignored
    machine.fire(&Trigger::new("MarkAsShipped"), &mut order, &evaluator, None)?;
    println!("Repeated MarkAsShipped ignored: {}", order.state_id());

    machine.fire(&Trigger::new("ConfirmDelivery"), &mut order, &evaluator, None)?;
    println!("After ConfirmDelivery: {}\n", order.state_id());

    // Nothing models this jump, so goto applies it unchecked
    let mut stray = Order {
        lifecycle: Lifecycle::new(1002, MachineId::new("orders"), OrderState::Placed),
        paid: false,
        shipping_address: None,
    };
    machine.goto(&OrderState::Cancelled, &mut stray, &evaluator, None)?;
    println!("Order {} cancelled by an operator: {}", stray.id(), stray.state_id());

    println!("\nHistory of order {}:", order.id());
    for change in order.lifecycle().history().changes() {
        println!("  {} -> {} ({:?})", change.from, change.to, change.cause);
    }

    let definition = MachineDefinition::from_machine(&machine);
    println!("\nMachine definition:\n{}", definition.to_json()?);

    Ok(())
}
