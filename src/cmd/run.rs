use anyhow::Context as _;
use clap::Args;
use goose::config::GooseConfiguration;
use goose::prelude::*;

use crate::scenario;

/// run the load test against a target site
#[derive(Debug, Clone, Args)]
pub struct RunCommand {
    /// base URL of the target site
    #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:8080")]
    host: String,

    /// number of simulated users hatched for the duration of the test
    #[arg(long, short = 'u', value_name = "N", default_value_t = 10)]
    users: usize,

    /// users hatched per second during ramp up
    #[arg(long, value_name = "RATE", default_value = "2")]
    hatch_rate: String,

    /// how long the load test runs once all users are hatched
    #[arg(long, value_name = "SECONDS", default_value_t = 60)]
    run_time: usize,

    /// also write an HTML report to the provided path
    #[arg(long, value_name = "FILE")]
    report_file: Option<String>,
}

pub async fn exec(args: RunCommand) -> anyhow::Result<()> {
    let profile = scenario::website_user()?;

    tracing::info!(
        profile = profile.name(),
        actions = profile.actions().len(),
        host = %args.host,
        users = args.users,
        run_time = args.run_time,
        "starting load test"
    );

    let scenario =
        scenario::goose_scenario(&profile).context("map behavior profile onto the runner")?;

    // Concurrency, pacing, per-request metrics, and the final report are
    // all owned by goose; this command only wires the profile in.
    let attack = GooseAttack::initialize_with_config(GooseConfiguration::default())
        .context("initialize load test runner")?
        .register_scenario(scenario)
        .set_default(GooseDefault::Host, args.host.as_str())?
        .set_default(GooseDefault::Users, args.users)?
        .set_default(GooseDefault::HatchRate, args.hatch_rate.as_str())?
        .set_default(GooseDefault::RunTime, args.run_time)?;

    let attack = match args.report_file.as_deref() {
        Some(path) => attack.set_default(GooseDefault::ReportFile, path)?,
        None => attack,
    };

    let _metrics = attack.execute().await.context("execute load test")?;

    Ok(())
}
