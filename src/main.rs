//! Wealth Reality CLI
//!
//! Thin caller around the library: gathers inputs from flags, config files
//! and `WR_*` environment variables, then prints the results.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use wealth_reality::debt::{load_debts, DebtPayoffSimulator};
use wealth_reality::projection::{future_value_of_annuity, opportunity_cost, project, AnnuityTiming};
use wealth_reality::{
    Debt, LeakageReport, PayoffResult, RepaymentStrategy, ScenarioConfig, ScenarioRunner,
};

#[derive(Parser)]
#[command(name = "wealth_reality", version, about = "Wealth projection and debt payoff calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a full scenario (defaults, then config file, then WR_* env vars)
    Report {
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV of debts (name,balance,rate)
        #[arg(long)]
        debts: Option<PathBuf>,

        /// Write the monthly growth path to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Yearly projection of a balance at a real rate
    Project {
        #[arg(long, default_value_t = 0.0)]
        assets: f64,
        /// Contribution added each year before compounding
        #[arg(long, default_value_t = 0.0)]
        surplus: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 10)]
        years: u32,
    },
    /// Months to clear a debt portfolio
    Debt {
        #[arg(long)]
        debts: Option<PathBuf>,
        /// Inline debt as balance:rate, repeatable
        #[arg(long = "debt", value_parser = parse_debt)]
        inline: Vec<Debt>,
        #[arg(long)]
        payment: f64,
        /// avalanche or snowball; both when omitted
        #[arg(long)]
        strategy: Option<RepaymentStrategy>,
        #[arg(long)]
        trace: bool,
    },
    /// Annual value lost to inflation, tax and interest drag
    Leakage {
        #[arg(long)]
        assets: f64,
        #[arg(long, default_value_t = 0.0)]
        tax: f64,
        #[arg(long, default_value_t = 0.0)]
        inflation: f64,
        #[arg(long, default_value_t = 0.0)]
        interest: f64,
    },
    /// Future value of investing a monthly amount instead
    Opportunity {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        /// Contribute at the end of each month instead of the start
        #[arg(long)]
        ordinary: bool,
    },
}

fn parse_debt(raw: &str) -> Result<Debt, String> {
    let (balance, rate) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected balance:rate, got '{}'", raw))?;
    let balance: f64 = balance.trim().parse().map_err(|_| format!("bad balance '{}'", balance))?;
    let rate: f64 = rate.trim().parse().map_err(|_| format!("bad rate '{}'", rate))?;
    Ok(Debt::new(balance, rate))
}

fn print_payoff(result: &PayoffResult) {
    match result.months_to_zero() {
        Some(months) => println!(
            "  {:<10} debt-free in {:>4} months ({:.1} years), interest {:>12.2}, paid {:>12.2}",
            result.strategy,
            months,
            months as f64 / 12.0,
            result.total_interest,
            result.total_paid
        ),
        None => println!(
            "  {:<10} NOT paid off within the horizon; the payment does not outrun the interest",
            result.strategy
        ),
    }
}

fn run_report(
    config_path: Option<PathBuf>,
    debts: Option<PathBuf>,
    csv_path: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => ScenarioConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    config.apply_env_overrides().context("Invalid WR_* environment override")?;
    if debts.is_some() {
        config.debts_file = debts;
    }

    let runner = ScenarioRunner::new(config).context("Invalid scenario")?;
    let report = runner.run();

    if let Some(path) = &csv_path {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        for row in report.growth_path.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let config = runner.config();
    println!("Wealth Reality v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Monthly surplus:   {:>14.2}", config.profile.surplus());
    println!("Starting balance:  {:>14.2}", config.profile.starting_assets);
    println!("Horizon:           {:>11} years", config.horizon_years);
    println!("Real rate ({:?}): {:.2}%", config.composition, report.real_rate * 100.0);
    println!();

    println!("Savings path (nominal {:.2}%):", config.rates.growth * 100.0);
    println!("  Final balance:   {:>14.2}", report.growth.final_balance);
    println!("  Total deposits:  {:>14.2}", report.growth.total_deposited);
    println!("  Interest gained: {:>14.2}", report.growth.interest_earned);
    match report.milestone_month {
        Some(month) => println!(
            "  Reaches {:.0} in {} months ({:.1} years)",
            config.milestone_target,
            month,
            month as f64 / 12.0
        ),
        None => println!("  Does not reach {:.0} within the horizon", config.milestone_target),
    }
    if let Some(pmt) = report.required_monthly_payment {
        println!("  Saving needed to reach it in {} years: {:.2}/month", config.horizon_years, pmt);
    }
    println!();

    println!("{:>5} {:>16}", "Year", "Real balance");
    println!("{}", "-".repeat(22));
    for point in &report.yearly.points {
        println!("{:>5} {:>16.2}", point.period, point.balance);
    }
    println!();

    println!("Annual leakage on final balance:");
    println!("  Inflation:       {:>14.2}", report.leakage.inflation_loss);
    println!("  Tax:             {:>14.2}", report.leakage.tax_loss);
    println!("  Interest drag:   {:>14.2}", report.leakage.interest_drag);
    println!("  Total:           {:>14.2}", report.leakage.total);
    println!();

    println!("Opportunity cost of the monthly surplus: {:.2}", report.opportunity_cost);

    if !report.debt.is_empty() {
        println!(
            "\nDebt payoff at {:.2}/month (configured: {}):",
            config.debt_payment, report.strategy
        );
        for result in &report.debt {
            print_payoff(result);
        }
    }

    if let Some(path) = csv_path {
        println!("\nMonthly path written to: {}", path.display());
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Report { config, debts, csv, json } => run_report(config, debts, csv, json)?,
        Command::Project { assets, surplus, rate, years } => {
            println!("{:>5} {:>16}", "Year", "Balance");
            for (period, balance) in project(assets, surplus, rate, years).iter().enumerate() {
                println!("{:>5} {:>16.2}", period, balance);
            }
        }
        Command::Debt { debts, inline, payment, strategy, trace } => {
            let mut portfolio = inline;
            if let Some(path) = debts {
                let loaded = load_debts(&path)
                    .with_context(|| format!("Failed to load debts from {}", path.display()))?;
                portfolio.extend(loaded);
            }
            if portfolio.is_empty() {
                bail!("No debts given; use --debts FILE or --debt balance:rate");
            }

            let simulator = DebtPayoffSimulator::new().with_trace(trace);
            let strategies = match strategy {
                Some(s) => vec![s],
                None => RepaymentStrategy::ALL.to_vec(),
            };
            for strategy in strategies {
                let result = simulator.simulate(&portfolio, payment, strategy);
                print_payoff(&result);
                for row in &result.trace {
                    println!(
                        "    month {:>4}: paid {:>10.2} interest {:>10.2} remaining {:>12.2}",
                        row.month, row.paid, row.interest, row.total_balance
                    );
                }
            }
        }
        Command::Leakage { assets, tax, inflation, interest } => {
            let report = LeakageReport::analyze(assets, tax, inflation, interest);
            println!("Inflation:     {:>14.2}", report.inflation_loss);
            println!("Tax:           {:>14.2}", report.tax_loss);
            println!("Interest drag: {:>14.2}", report.interest_drag);
            println!("Total:         {:>14.2}", report.total);
        }
        Command::Opportunity { amount, rate, years, ordinary } => {
            let value = if ordinary {
                future_value_of_annuity(amount, rate, years, AnnuityTiming::Ordinary)
            } else {
                opportunity_cost(amount, rate, years)
            };
            println!(
                "{:.2}/month invested at {:.2}% for {} years grows to {:.2}",
                amount,
                rate * 100.0,
                years,
                value
            );
        }
    }

    Ok(())
}
