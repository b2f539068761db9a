use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use workout_core::chart::format_amount;
use workout_core::record::{
    parse_date, parse_duration, parse_exercise_name, parse_reps, parse_sets, parse_weight,
    DATE_FORMAT,
};
use workout_core::*;

#[derive(Parser)]
#[command(name = "wlog")]
#[command(about = "Personal workout log with progress reports", long_about = None)]
struct Cli {
    /// Override data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Use this CSV file as the workout log (overrides --data-dir)
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging; keep stdout for the menu
    workout_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    let store_path = cli.store.unwrap_or_else(|| config.store_path());

    let mut store = CsvStore::new(store_path);
    if let Err(e) = store.ensure_exists() {
        eprintln!(
            "Could not open workout log {}: {}",
            store.path().display(),
            e
        );
        return Err(e);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    run_menu(&mut console, &mut store, &config)
}

enum MenuChoice {
    Add,
    Report,
    Exit,
    Invalid,
}

fn run_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut CsvStore,
    config: &Config,
) -> Result<()> {
    loop {
        console.say("\nWorkout Log")?;
        console.say("1) Add workout")?;
        console.say("2) Generate report")?;
        console.say("3) Exit")?;

        let choice = match console.ask("Choose an option: ")? {
            None => MenuChoice::Exit,
            Some(line) => match line.as_str() {
                "1" => MenuChoice::Add,
                "2" => MenuChoice::Report,
                "3" => MenuChoice::Exit,
                _ => MenuChoice::Invalid,
            },
        };

        match choice {
            MenuChoice::Add => cmd_add(console, store)?,
            MenuChoice::Report => cmd_report(console, store, config)?,
            MenuChoice::Exit => {
                console.say("Goodbye!")?;
                return Ok(());
            }
            MenuChoice::Invalid => console.say("Invalid choice.")?,
        }
    }
}

fn cmd_add<R: BufRead, W: Write>(console: &mut Console<R, W>, store: &mut CsvStore) -> Result<()> {
    let Some(draft) = prompt_workout(console)? else {
        // Input ended mid-entry; the menu will see EOF next
        return Ok(());
    };

    let record = match WorkoutRecord::construct(draft) {
        Ok(record) => record,
        Err(e) => {
            console.say(&format!("Workout not saved: {}", e))?;
            return Ok(());
        }
    };

    match store.append(&record) {
        Ok(()) => console.say(&format!("Saved workout: {}", record))?,
        Err(e) => {
            tracing::error!("Append to {:?} failed: {}", store.path(), e);
            console.say(&format!("Could not save workout: {}", e))?;
        }
    }
    Ok(())
}

/// Collect one workout, re-prompting each field until it validates
fn prompt_workout<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Option<WorkoutDraft>> {
    let today = Local::now().date_naive();
    let today_text = today.format(DATE_FORMAT).to_string();

    let Some(date) = console.ask_field(
        &format!("Date (YYYY-MM-DD) [default: {}]: ", today_text),
        |s| date_or_today(s, today),
    )?
    else {
        return Ok(None);
    };
    let date = if date.is_empty() { today_text } else { date };

    let Some(exercise_name) = console.ask_field("Exercise name: ", parse_exercise_name)? else {
        return Ok(None);
    };

    let Some(answer) = console.ask("Is this cardio? (y/N): ")? else {
        return Ok(None);
    };
    let is_cardio = matches!(answer.to_lowercase().as_str(), "y" | "yes");

    if is_cardio {
        let Some(minutes) = console.ask_field("Duration (minutes): ", parse_duration)? else {
            return Ok(None);
        };
        return Ok(Some(
            WorkoutDraft::new(WorkoutKind::Cardio, date, exercise_name).duration_minutes(minutes),
        ));
    }

    let Some(sets) = console.ask_field("Sets: ", parse_sets)? else {
        return Ok(None);
    };
    let Some(reps) = console.ask_field("Reps: ", parse_reps)? else {
        return Ok(None);
    };
    let Some(weight) = console.ask_field("Weight (0 for bodyweight): ", parse_weight)? else {
        return Ok(None);
    };

    Ok(Some(
        WorkoutDraft::new(WorkoutKind::Resistance, date, exercise_name)
            .sets(sets)
            .reps(reps)
            .weight(weight),
    ))
}

fn date_or_today(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    if input.is_empty() {
        Ok(today)
    } else {
        parse_date(input)
    }
}

fn cmd_report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &CsvStore,
    config: &Config,
) -> Result<()> {
    let contents = match store.load_all() {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!("Reading {:?} failed: {}", store.path(), e);
            console.say(&format!("Could not read workout log: {}", e))?;
            return Ok(());
        }
    };

    if !contents.skipped.is_empty() {
        console.say(&format!(
            "\nSkipped {} malformed row(s) in {}:",
            contents.skipped.len(),
            store.path().display()
        ))?;
        for row in &contents.skipped {
            console.say(&format!("  line {}: {}", row.line, row.reason))?;
        }
    }

    if contents.records.is_empty() {
        console.say("No workouts logged yet.")?;
        return Ok(());
    }

    let report = Report::from_records(&contents.records);

    console.say("\nWorkout frequency per exercise:")?;
    let frequency = ranked(&report.frequency);
    console.table(frequency.iter().map(|(name, count)| (*name, count.to_string())))?;

    console.say("\nTotal volume per exercise:")?;
    let volume = ranked(&report.volume);
    if volume.is_empty() {
        console.say("  (no resistance workouts)")?;
    }
    console.table(volume.iter().map(|(name, total)| (*name, format_amount(*total))))?;

    console.say("\nPersonal records (max weight per exercise):")?;
    let prs = report.ranked_personal_records();
    if prs.is_empty() {
        console.say("  (no resistance workouts)")?;
    }
    console.table(prs.iter().map(|(name, pr)| {
        (
            *name,
            format!("{} ({})", format_amount(pr.weight), pr.date.format(DATE_FORMAT)),
        )
    }))?;

    console.say(&format!(
        "\nTotal cardio duration (minutes): {}",
        format_amount(report.total_cardio_minutes)
    ))?;

    let frequency_chart = BarChart::new("Workout Frequency per Exercise", "Exercise", "Sessions")
        .with_bars(frequency.iter().map(|(name, count)| (*name, *count as f64)));
    let volume_chart = BarChart::new(
        "Total Volume per Exercise",
        "Exercise",
        "Total Volume (sets * reps * weight)",
    )
    .with_bars(volume.iter().map(|(name, total)| (*name, *total)));

    console.say("")?;
    console.say(&frequency_chart.render(config.report.chart_width))?;
    console.say(&volume_chart.render(config.report.chart_width))?;

    Ok(())
}

/// Line-oriented prompt/response over any reader and writer
struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; None at end of input
    ///
    /// A line that is not valid UTF-8 is refused and asked again.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }
            match String::from_utf8(bytes) {
                Ok(line) => return Ok(Some(line.trim().to_string())),
                Err(_) => self.say("  input is not valid UTF-8. Please try again.")?,
            }
        }
    }

    /// Ask until `validate` accepts the answer, returning the accepted text
    fn ask_field<T>(
        &mut self,
        prompt: &str,
        validate: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match validate(&answer) {
                Ok(_) => return Ok(Some(answer)),
                Err(e) => self.say(&format!("  {}. Please try again.", e))?,
            }
        }
    }

    fn table<'a>(&mut self, rows: impl Iterator<Item = (&'a str, String)>) -> Result<()> {
        let rows: Vec<(&str, String)> = rows.collect();
        let width = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        for (name, value) in rows {
            self.say(&format!("  {:<width$}  {}", name, value, width = width))?;
        }
        Ok(())
    }
}
