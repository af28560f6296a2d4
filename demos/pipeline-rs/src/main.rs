pub mod config;
pub mod output;

use std::io::{self, Read};

use log::info;

use config::RunConfig;
use episir::{
    MissingPolicy, SirParams, SirState, Table, indicators, latest_snapshot, merge,
    normalize_cases, normalize_population, simulate,
};

fn main() {
    simple_logger::SimpleLogger::new().init().unwrap();

    // Run configuration arrives as JSON on stdin
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .expect("failed to read stdin");
    let config: RunConfig =
        serde_json::from_str(&raw).expect("failed to parse run configuration");

    // Ingest and reconcile the two tables
    let cases = Table::from_path(&config.cases).expect("failed to read case table");
    let population = Table::from_path(&config.population).expect("failed to read population table");
    let case_records = normalize_cases(&cases).expect("case table rejected");
    let pop_records = normalize_population(&population).expect("population table rejected");
    let reconciled =
        merge(&case_records, &pop_records, MissingPolicy::Drop).expect("merge failed");
    info!("reconciled {} rows", reconciled.len());

    // Seed from the configured country's earliest observation
    let seed = reconciled
        .iter()
        .filter(|r| r.country == config.country)
        .min_by_key(|r| r.date)
        .unwrap_or_else(|| panic!("country {:?} not present in reconciled data", config.country));

    let mut params = SirParams {
        beta: config.beta,
        gamma: config.gamma,
    };
    let mut init = SirState {
        s: seed.s,
        i: seed.i,
        r: seed.r,
    };
    if let Some(scenario) = &config.scenario {
        (params, init) = scenario.apply(&params, &init);
        info!("applied scenario {:?}", scenario.name);
    }

    // Run simulation
    let trajectory = simulate(seed.population, &params, init, config.horizon_days, config.step)
        .expect("simulation rejected");
    let summary = indicators(&trajectory);
    println!(
        "peak_I={:.1} t_peak={} duration_days={}",
        summary.peak_i, summary.t_peak, summary.duration_days
    );

    // Build CSV rows
    let rows: Vec<Vec<String>> = (0..trajectory.len())
        .map(|k| {
            vec![
                trajectory.t[k].to_string(),
                trajectory.s[k].to_string(),
                trajectory.i[k].to_string(),
                trajectory.r[k].to_string(),
            ]
        })
        .collect();
    output::write_csv(
        config.out_dir.as_deref(),
        "sir_trajectory.csv",
        &["t", "S", "I", "R"],
        &rows,
    );

    let rows: Vec<Vec<String>> = latest_snapshot(&reconciled)
        .iter()
        .map(|s| vec![s.country.clone(), s.value.to_string()])
        .collect();
    output::write_csv(
        config.out_dir.as_deref(),
        "snapshot.csv",
        &["country", "value"],
        &rows,
    );
}
