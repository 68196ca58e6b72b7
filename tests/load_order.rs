//! Load-order independence: whatever order the modules arrive in, and whichever of
//! them are seeded at construction, the final subscription set is the same.

mod common;

use std::sync::Arc;

use proptest::prelude::*;

use common::{commands, Api1, Api2, Recorder, API1, API2};
use eventwire::{Coordinator, EventSource, Module};

struct Bystander {
    source: EventSource,
}

impl Module for Bystander {
    fn name(&self) -> &str {
        "Bystander"
    }

    fn source(&self) -> &EventSource {
        &self.source
    }
}

/// Subscriber/handler pairs for every event on every module, as one sorted list.
fn wiring(coordinator: &Coordinator) -> Vec<(String, String, String, String)> {
    let mut out = Vec::new();
    for (name, module) in coordinator.registry().iter() {
        for event in module.source().events() {
            for sub in module.source().subscriptions(&event) {
                out.push((
                    name.to_string(),
                    event.to_string(),
                    sub.subscriber.to_string(),
                    sub.handler.to_string(),
                ));
            }
        }
    }
    out.sort();
    out
}

fn run(order: &[usize], seeded: usize) -> (Vec<(String, String, String, String)>, usize, usize) {
    let rec1 = Arc::new(Recorder::default());
    let rec2 = Arc::new(Recorder::default());
    let api1 = Api1::new(rec1.clone());
    let api2 = Api2::new(rec2.clone());
    let all: Vec<Arc<dyn Module>> = vec![
        api1.clone(),
        api2.clone(),
        Arc::new(Bystander {
            source: EventSource::new(),
        }),
    ];

    let mut arrivals = order.iter().map(|&i| Arc::clone(&all[i]));
    let initial: Vec<Arc<dyn Module>> = arrivals.by_ref().take(seeded).collect();
    let coordinator = Coordinator::new(commands(), initial).unwrap();
    for module in arrivals {
        coordinator.load_module(module).unwrap();
    }

    api1.publish("click", &[]).unwrap();
    api2.publish("error", &[]).unwrap();
    (wiring(&coordinator), rec1.count(), rec2.count())
}

proptest! {
    #[test]
    fn final_wiring_does_not_depend_on_arrival_order(
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
        seeded in 0usize..=3,
    ) {
        let (wiring, errors_seen, clicks_seen) = run(&order, seeded);

        prop_assert_eq!(
            wiring,
            vec![
                (API1.to_string(), "click".to_string(), API2.to_string(), "on_click_from_api1".to_string()),
                (API2.to_string(), "error".to_string(), API1.to_string(), "on_error_from_api2".to_string()),
            ]
        );
        prop_assert_eq!(errors_seen, 1);
        prop_assert_eq!(clicks_seen, 1);
    }
}

#[test]
fn a_then_b_matches_b_then_a() {
    assert_eq!(run(&[0, 1], 0), run(&[1, 0], 0));
}
