use std::env;

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use size_guide::shell::{self, FormState};
use size_guide::simulator;
use size_guide::types::*;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "size_guide=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    if args.iter().any(|a| a == "--simulate") {
        return simulate(&args);
    }

    recommend(&args)
}

fn recommend(args: &[String]) -> Result<()> {
    let current_year = current_year()?;
    let form = form_from_args(args)?;
    tracing::debug!(?form, current_year, "parsed form");

    if args.iter().any(|a| a == "--guide") {
        print_guide(&form);
        return Ok(());
    }

    let result = shell::submit(&form, current_year).context("could not compute a size")?;

    if args.iter().any(|a| a == "--json") {
        let json = serde_json::to_string_pretty(&result).context("failed to serialize result")?;
        println!("{}", json);
    } else {
        println!(
            "{}",
            shell::render_result(&result, form.category, form.age(current_year))
        );
    }
    Ok(())
}

fn print_guide(form: &FormState) {
    let image = shell::guide_for(form.category, form.cut);
    let copy = shell::abc_copy(form.category);
    println!("{}", image.title);
    println!("  imagen: {}", image.src);
    println!("  (si no carga: {})", shell::guide_placeholder(&image));
    println!("Que significan A, B y C");
    for line in [copy.a, copy.b, copy.c] {
        println!("  {}", line);
    }
}

fn simulate(args: &[String]) -> Result<()> {
    let max_samples: usize = parse_flag(args, "--max-samples").unwrap_or(10000);
    let seed: u64 = parse_flag(args, "--seed").unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");

    println!("Size Guide Simulator");
    println!("====================");
    println!("Running {} samples (seed: {})", max_samples, seed);
    println!();
    println!("Checking properties:");
    for name in simulator::property_names() {
        println!("  - {}", name);
    }

    let result = simulator::run_simulation(max_samples, seed, verbose);
    println!("{}", result);

    if !result.passed() {
        bail!("simulation found a property violation");
    }
    Ok(())
}

/// Current year for age checks. `SIZE_GUIDE_YEAR` overrides the clock.
fn current_year() -> Result<i32> {
    match env::var("SIZE_GUIDE_YEAR") {
        Ok(year) => year
            .trim()
            .parse()
            .with_context(|| format!("SIZE_GUIDE_YEAR is not a year: {:?}", year)),
        Err(_) => Ok(chrono::Local::now().year()),
    }
}

fn form_from_args(args: &[String]) -> Result<FormState> {
    let mut form = FormState::default();

    if let Some(height) = flag_value(args, "--height") {
        form.height = height;
    }
    if let Some(weight) = flag_value(args, "--weight") {
        form.weight = weight;
    }
    if let Some(year) = flag_value(args, "--birth-year") {
        form.birth_year = year;
    }
    if let Some(sex) = flag_value(args, "--sex") {
        form.sex = sex.parse()?;
    }
    if let Some(fit) = flag_value(args, "--fit") {
        form.fit = fit.parse()?;
    }
    if let Some(category) = flag_value(args, "--category") {
        form.category = category.parse()?;
    }
    if let Some(cut) = flag_value(args, "--cut") {
        form.cut = cut.parse()?;
    }
    if let Some(unit) = flag_value(args, "--height-unit") {
        form.height_unit = unit.parse::<HeightUnit>()?;
    }
    if let Some(unit) = flag_value(args, "--weight-unit") {
        form.weight_unit = unit.parse::<WeightUnit>()?;
    }

    Ok(form)
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    parse_flag::<String>(args, flag)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    for i in 0..args.len() {
        if args[i].starts_with(&format!("{}=", flag)) {
            return args[i].split_once('=').and_then(|(_, v)| v.parse().ok());
        }
        if args[i] == flag {
            return args.get(i + 1).and_then(|v| v.parse().ok());
        }
    }
    None
}

fn print_usage() {
    println!("Usage:");
    println!("  size-guide --height 175 --weight 72 --birth-year 1990 [options]");
    println!("  size-guide --simulate [--max-samples N] [--seed S] [--verbose]");
    println!();
    println!("Options:");
    println!("  --fit holgado|normal|ajustado        (default: normal)");
    println!("  --category pantalones|camisas|sudaderas|polos|jerseys|camisetas");
    println!("                                       (default: camisas)");
    println!("  --cut regular|slim                   (default: regular)");
    println!("  --height-unit cm|in  --weight-unit kg|lb");
    println!("  --sex masculino|femenino|otro");
    println!("  --json                               print the result as JSON");
    println!("  --guide                              show the size-guide image and A/B/C notes");
    println!();
    println!("Environment:");
    println!("  SIZE_GUIDE_YEAR   year used for age checks (default: current year)");
    println!("  RUST_LOG          log filter (default: size_guide=info,warn)");
}
