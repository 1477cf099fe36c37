//! Allocation engine binary

use anyhow::Context;
use balancing_allocator::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("╔════════════════════════════════════════════════╗");
    println!("║   Balancing Market Allocator v0.1.0            ║");
    println!("╚════════════════════════════════════════════════╝\n");

    let site_id: Option<String> = std::env::args().nth(1);
    let registry = SiteRegistry::builtin();
    let site: &SiteConfig = registry.get_or_default(site_id.as_deref());

    let policy = PricingPolicy::from_env().context("invalid ALLOCATOR_* configuration")?;
    let engine = AllocationEngine::new(policy)?;

    let provider = SyntheticMarketData::now();
    let inputs: MarketInputs = load_market_inputs(&provider)
        .await
        .with_context(|| format!("loading series from {} source", provider.source_label()))?;

    let snapshot: DashboardSnapshot = engine.snapshot(&inputs, site);

    println!(
        "✓ Site {} (#{}), {:.1} MW, {}% SOC",
        site.name, site.id, site.capacity, site.soc
    );
    println!("  Horizon: {} h\n", snapshot.horizon_hours);

    println!("MARKET TURNOVER:");
    for t in &snapshot.turnovers {
        println!(
            "   {:<6} {:>12.0} SEK  ({:?})",
            t.market.label(),
            t.turnover_sek,
            t.trend
        );
    }

    println!("\nMARKET DOMINANCE:");
    for d in &snapshot.dominance {
        println!(
            "   {:<6} {:>3} h  {:>5.1}%  now {:>8.0} SEK",
            d.market.label(),
            d.winner_hours,
            d.winner_share_pct,
            d.current_optimized_sek
        );
    }

    let cmp = &snapshot.strategy_comparison;
    println!("\nTOP RECOMMENDATION: {}", snapshot.top_recommendation);
    println!("   Optimized:  {:>12.0} SEK", cmp.total_ai_strategy_revenue);
    println!("   Static FCR-N: {:>10.0} SEK", cmp.static_fcrn_revenue);
    println!("   Alpha:      {:>+11.1}%", cmp.revenue_alpha_pct);

    let insight = &snapshot.reasoning;
    println!(
        "\nREASONING ({:?}, score {}):",
        insight.confidence, insight.confidence_score
    );
    println!("   {}", insight.summary);
    println!("   {}", insight.strategy);
    for driver in &insight.drivers {
        println!("   - {}", driver);
    }

    println!("\n{}", "═".repeat(50));
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    println!("\n{}", engine.get_metrics().summary());

    Ok(())
}
