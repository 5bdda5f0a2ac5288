//! One-shot discovery run: build the area plan, load backing data, run
//! the pipeline, print a ranked summary, write the export CSV.

use std::fs::File;

use anyhow::Context;

use leadscout_core::AppConfig;
use leadscout_engine::{
    discover, load_zip_list, plan_areas, write_csv, DiscoveryRequest, ResultSet, RosterIndex,
    SearchScope, TOP_100_METROS,
};
use leadscout_places::PlacesClient;

use crate::{Cli, Mode};

pub(crate) async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let scope = match cli.mode {
        Mode::All => SearchScope::AllAreas,
        Mode::Metro => {
            for metro in &cli.metros {
                if !TOP_100_METROS.contains(&metro.as_str()) {
                    tracing::warn!(
                        metro = %metro,
                        "metro is not in the known catalog — the geocoder will decide"
                    );
                }
            }
            SearchScope::MetroAreas(cli.metros.clone())
        }
        Mode::Zips => SearchScope::SpecificAreas(cli.zips.clone()),
    };

    // The zip universe is only needed (and only loaded) for all-areas mode.
    let all_zips = match cli.mode {
        Mode::All => load_zip_list(&config.zips_path),
        Mode::Metro | Mode::Zips => Vec::new(),
    };
    let plan = plan_areas(scope, &all_zips)?;

    let roster = RosterIndex::load(&config.accounts_path);
    if roster.is_empty() {
        tracing::info!("no roster data loaded — every candidate will classify as New");
    }

    let client = PlacesClient::new(
        &config.google_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )?;

    tracing::info!(
        query = %cli.query,
        areas = plan.areas.len(),
        radius_m = plan.radius_m,
        max_results = cli.max_results,
        "starting discovery"
    );

    let request = DiscoveryRequest {
        query: &cli.query,
        plan: &plan,
        max_results: cli.max_results,
        excluded_account_types: &cli.excluded_account_types,
        photo_max_width: config.photo_max_width,
    };
    let mut results = discover(&client, &roster, &request).await;

    if results.is_empty() {
        println!("No matching places were found after filtering.");
        return Ok(());
    }

    print_summary(&results);

    results.select_all();
    let records = results.export_records();
    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_csv(&records, file)?;
    println!(
        "Wrote {} locations to {}",
        records.len(),
        cli.output.display()
    );

    Ok(())
}

fn print_summary(results: &ResultSet) {
    for candidate in results.all() {
        let detail = &candidate.detail;
        println!(
            "[tier {}] {} — {} ({})",
            candidate.tier,
            detail.name.as_deref().unwrap_or("(unnamed)"),
            detail.formatted_address.as_deref().unwrap_or("no address"),
            candidate.account_type
        );
    }
}
