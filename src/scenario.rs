use std::sync::Arc;

use goose::goose::TransactionFunction;
use goose::prelude::*;

use crate::profile::{BehaviorProfile, WaitTime, WeightedAction};

/// The simulated web site visitor.
///
/// On every iteration the runner picks one action (weights in
/// parentheses), performs the GET, and waits between one and two seconds
/// before the next pick:
///
/// - `GET /` (2)
/// - `GET /page2.html` (1)
/// - `GET /nonexistent.html` (1), reported under the fixed name
///   `/nonexistent.html` so a parameterized path would still aggregate
///   under a single line.
pub fn website_user() -> anyhow::Result<BehaviorProfile> {
    BehaviorProfile::new(
        "WebsiteUser",
        WaitTime::between_secs(1, 2)?,
        vec![
            WeightedAction::get("/", 2),
            WeightedAction::get("/page2.html", 1),
            WeightedAction::get("/nonexistent.html", 1).with_label("/nonexistent.html"),
        ],
    )
}

/// Map a declarative behavior profile onto a goose scenario.
///
/// Weights, reporting names, and the wait interval carry over unchanged;
/// request execution and bookkeeping stay with goose.
pub fn goose_scenario(profile: &BehaviorProfile) -> Result<Scenario, GooseError> {
    let mut scenario = Scenario::new(profile.name())
        .set_wait_time(profile.wait_time().low(), profile.wait_time().high())?;

    for action in profile.actions() {
        let transaction = Transaction::new(get_transaction(action))
            .set_name(action.report_name())
            .set_weight(action.weight())?;
        scenario = scenario.register_transaction(transaction);
    }

    Ok(scenario)
}

/// One GET per invocation. Outcome recording (status, latency, failure
/// classification) is owned by the runner's statistics layer; nothing is
/// retried or handled here.
fn get_transaction(action: &WeightedAction) -> TransactionFunction {
    let path = action.path().to_owned();
    let label = action.label().map(str::to_owned);

    let function: TransactionFunction = Arc::new(move |user| {
        let path = path.clone();
        let label = label.clone();
        Box::pin(async move {
            match label {
                Some(label) => {
                    let _response = user.get_named(&path, &label).await?;
                }
                None => {
                    let _response = user.get(&path).await?;
                }
            }
            Ok(())
        })
    });
    function
}
