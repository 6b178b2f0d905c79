use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use shiftboard_core::config::ShiftboardConfig;
use shiftboard_core::types::TimeSlot;
use shiftboard_planner::week::{local_today, DAY_NAMES};
use shiftboard_planner::{HttpScheduleApi, Notice, Planner};

#[derive(Parser)]
#[command(name = "shiftboard", version, about = "Weekly volunteer shift planner")]
struct Cli {
    /// Config file (defaults to ~/.shiftboard/shiftboard.toml)
    #[arg(long, env = "SHIFTBOARD_CONFIG", global = true)]
    config: Option<String>,

    /// Gateway base URL, overrides client.base_url
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the grid for a week
    Week(WeekArgs),
    /// List registered volunteers
    Volunteers,
    /// Register a volunteer with the default role
    Register(NameArgs),
    /// Toggle one or more cells for a volunteer and sync the result
    Toggle(ToggleArgs),
}

#[derive(Args)]
struct WeekArgs {
    /// Weeks relative to the current one
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i32,
}

#[derive(Args)]
struct NameArgs {
    #[arg(long)]
    first: String,
    #[arg(long)]
    last: String,
}

#[derive(Args)]
struct ToggleArgs {
    #[command(flatten)]
    name: NameArgs,

    #[command(flatten)]
    week: WeekArgs,

    /// Cells as DAY:ROW, both zero-based (0 = Sunday, 0 = 8:00 - 10:00)
    #[arg(required = true)]
    cells: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shiftboard_planner=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ShiftboardConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        ShiftboardConfig::default()
    });
    let api = match cli.url {
        Some(url) => HttpScheduleApi::new(url),
        None => HttpScheduleApi::from_config(&config.client),
    };
    let mut planner = Planner::new(api, local_today(), &config.volunteers.default_role)?;

    match cli.command {
        Command::Week(args) => {
            seek(&mut planner, args.offset)?;
            report(planner.refresh().await);
            print_week(&planner);
        }
        Command::Volunteers => {
            report(planner.refresh().await);
            for v in planner.identity().directory() {
                println!("{:>5}  {:<30} {}", v.id, v.display_name(), v.role);
            }
        }
        Command::Register(name) => {
            planner.set_first_name(&name.first);
            planner.set_last_name(&name.last);
            let notice = planner.register_volunteer().await;
            println!("{notice}");
        }
        Command::Toggle(args) => {
            let cells = args
                .cells
                .iter()
                .map(|c| parse_cell(c))
                .collect::<Result<Vec<_>>>()?;

            seek(&mut planner, args.week.offset)?;
            report(planner.refresh().await);
            planner.set_first_name(&args.name.first);
            planner.set_last_name(&args.name.last);
            let notice = planner.find_volunteer().await;
            println!("{notice}");
            if planner.active().is_none() {
                bail!("no registered volunteer named {} {}", args.name.first, args.name.last);
            }

            for (day, slot) in &cells {
                report(planner.click(*day, slot).await);
            }
            if let Some(notice) = planner.sync().await.notice() {
                println!("{notice}");
            }
            print_week(&planner);
        }
    }
    Ok(())
}

fn seek<A: shiftboard_planner::ScheduleApi>(planner: &mut Planner<A>, offset: i32) -> Result<()> {
    if !planner.set_week_offset(offset) {
        bail!("week offset {offset} is out of range");
    }
    Ok(())
}

fn report(notice: Option<Notice>) {
    if let Some(n) = notice {
        println!("{n}");
    }
}

fn parse_cell(s: &str) -> Result<(usize, TimeSlot)> {
    let (day, row) = s
        .split_once(':')
        .with_context(|| format!("cell {s:?} is not DAY:ROW"))?;
    let day: usize = day.parse().with_context(|| format!("bad day in {s:?}"))?;
    let row: usize = row.parse().with_context(|| format!("bad row in {s:?}"))?;
    if day >= DAY_NAMES.len() {
        bail!("day {day} out of range 0-6");
    }
    let slot = TimeSlot::all()
        .into_iter()
        .nth(row)
        .with_context(|| format!("row {row} out of range 0-6"))?;
    Ok((day, slot))
}

fn print_week<A: shiftboard_planner::ScheduleApi>(planner: &Planner<A>) {
    let window = planner.window();
    match window.offset() {
        0 => println!("\n{}", window.range_label()),
        n => println!("\n{} ({n:+} weeks)", window.range_label()),
    }

    print!("{:<8}", "");
    for (name, label) in DAY_NAMES.iter().zip(window.day_labels()) {
        print!("{:<18}", format!("{} {}", &name[..3], label));
    }
    println!();

    for (slot, row) in planner.grid() {
        print!("{:<8}", slot.start_label());
        for names in row {
            print!("{:<18}", names.join(", "));
        }
        println!();
    }

    let cards = planner.active_volunteers();
    if !cards.is_empty() {
        println!("\nThis week:");
        for card in cards {
            let stats = planner.stats(&card.name);
            println!(
                "  {:<24} {:<12} {} shifts, {} h",
                card.name, card.role, stats.shifts, stats.hours
            );
        }
    }
}
