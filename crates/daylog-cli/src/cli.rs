//! Command handlers bridging parsed arguments and the core library.

use anyhow::{bail, Context, Result};
use daylog_core::config::DEFAULT_STAT_DAYS;
use daylog_core::time::{self, clock, format_time};
use daylog_core::{
    job_report, minute_cells, stat_report, Age, CompiledSet, DayRange, Finish, Hm, HoursMinutes,
    Job, JobSet, RangeQuery, ScheduleItem, ScheduleListing, SetValue, Store,
};
use log::info;

use crate::args::{RangeArgs, TaskCommands};
use crate::prompt::confirm;
use crate::renderer::TerminalRenderer;

/// Rows of the plot grid; one day is 15 rows of 96 minutes.
const PLOT_ROWS: usize = 15;
const PLOT_COLUMNS: usize = (time::MINUTES_PER_DAY as usize) / PLOT_ROWS;

/// CLI command handler holding the store and renderer.
pub struct Cli {
    store: Store,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(store: Store, renderer: TerminalRenderer) -> Self {
        Self { store, renderer }
    }

    /// Expands a task name to its content; anything that is not a task
    /// name passes through unchanged.
    fn resolve_content(&self, content: &str) -> Result<String> {
        let tasks = self.store.load_tasks()?;
        Ok(tasks.resolve(content).unwrap_or(content).to_string())
    }

    fn compiled_groups(&self) -> Result<CompiledSet> {
        let settings = self.store.load_settings()?;
        Ok(CompiledSet::compile(&settings)?)
    }

    /// Resolves a reporting range with the given default first day,
    /// expressed in days before today.
    fn resolve_range(&self, query: &RangeQuery, default_back: i64) -> Result<DayRange> {
        let today = clock::today();
        let back = i32::try_from(default_back).unwrap_or(DEFAULT_STAT_DAYS as i32);
        let default_first = time::add_days(today, -back)?;
        Ok(DayRange::resolve(query, today, default_first)?)
    }

    pub fn start(&self, content: Option<String>, at: Option<String>) -> Result<()> {
        let content = self.resolve_content(content.as_deref().unwrap_or(""))?;
        let start = match at {
            Some(s) => time::expand_time(&s, clock::today())
                .with_context(|| format!("Invalid time: {s}"))?,
            None => clock::now(),
        };
        if let Some(current) = self.store.load_current()? {
            println!("Task already started: {}", current.content());
            println!("At Time: {}", format_time(current.start()));
            if !confirm("Want to override it? (y/N) ", false)? {
                return Ok(());
            }
        }
        let item = ScheduleItem::started_at(start, content);
        println!("Started: {}", item.content());
        println!("Time: {}", format_time(item.start()));
        self.store.save_current(&item)?;
        Ok(())
    }

    pub fn restart(&self, arg: Option<String>) -> Result<()> {
        let Some(mut current) = self.store.load_current()? else {
            bail!("No started task to restart");
        };
        match arg {
            // A time moves the start; anything else is new content,
            // restarted now.
            Some(arg) => match time::expand_time(&arg, clock::today()) {
                Ok(start) => current
                    .set_start(start)
                    .context("Failed to move start time")?,
                Err(_) => {
                    current.set_content(self.resolve_content(&arg)?);
                    current.set_start(clock::now())?;
                }
            },
            None => current.set_start(clock::now())?,
        }
        println!("Restarted: {}", current.content());
        println!("Time: {}", format_time(current.start()));
        self.store.save_current(&current)?;
        Ok(())
    }

    pub fn cancel(&self) -> Result<()> {
        let Some(current) = self.store.load_current()? else {
            bail!("No started task to cancel");
        };
        println!("Started task: {}", current.content());
        println!("At Time: {}", format_time(current.start()));
        if !confirm("Want to cancel it? (y/N) ", false)? {
            return Ok(());
        }
        self.store.clear_current()?;
        println!("Canceled");
        Ok(())
    }

    pub fn finish(&self, at: Option<String>) -> Result<()> {
        let finish = match &at {
            Some(s) => Some(
                time::expand_time(s, clock::today())
                    .with_context(|| format!("Invalid time: {s}"))?,
            ),
            None => None,
        };
        let Some(mut current) = self.store.load_current()? else {
            return self.prolong(finish);
        };
        println!("Going to finish task: {}", current.content());
        println!("Started at time: {}", format_time(current.start()));
        if !confirm("Proceed? (Y/n) ", true)? {
            return Ok(());
        }
        let finish = finish.unwrap_or_else(clock::now);
        println!("Going to finish at {}", format_time(finish));
        current
            .set_finish(finish)
            .context("Failed to set finish time")?;

        let day = current.start_day();
        let mut schedule = self.store.load_day(day)?;
        schedule.push(current.clone());
        self.store.save_day(day, &schedule)?;
        println!("Finished at time: {}", format_time(finish));
        println!("Duration: {}", Hm(current.duration_minutes()?));
        self.store.clear_current()?;
        Ok(())
    }

    /// No running activity: extend the last finished one instead. The
    /// day to amend is the finish time's day if given, otherwise today,
    /// falling back to yesterday.
    fn prolong(&self, finish: Option<jiff::civil::DateTime>) -> Result<()> {
        let day = match finish {
            Some(t) => t.date(),
            None => {
                if self.store.has_activity(clock::today())? {
                    clock::today()
                } else if self.store.has_activity(clock::yesterday()?)? {
                    clock::yesterday()?
                } else {
                    bail!("Cannot prolong task started too long ago!");
                }
            }
        };
        let mut schedule = self.store.load_day(day)?;
        let last = schedule.last().context("Empty schedule file")?.clone();
        let old_finish = match last.finish() {
            Finish::Closed(t) => format_time(t),
            Finish::Pending => "unfinished".to_string(),
        };
        println!("No started schedule! Have to prolong the last item.");
        println!("Last: {}", last.content());
        println!("Started at: {}", format_time(last.start()));
        println!("Finished at: {old_finish}");
        if !confirm("Proceed to prolong? (Y/n) ", true)? {
            return Ok(());
        }
        let finish = finish.unwrap_or_else(clock::now);
        let mut updated = last;
        updated
            .set_finish(finish)
            .context("Failed to set finish time")?;
        schedule.replace_last(updated.clone())?;
        self.store.save_day(day, &schedule)?;
        println!("Update finish time to: {}", format_time(finish));
        println!("Duration: {}", Hm(updated.duration_minutes()?));
        Ok(())
    }

    pub fn list(&self, args: RangeArgs) -> Result<()> {
        let today = clock::today();
        let range = DayRange::resolve(&args.into_params(), today, clock::yesterday()?)?;
        for day in range.days() {
            let schedule = self.store.load_day(day)?;
            print!("{}", ScheduleListing::new(day, &schedule));
        }
        Ok(())
    }

    pub fn stat(&self, args: RangeArgs) -> Result<()> {
        let config = self.store.load_config()?;
        let range = self.resolve_range(&args.into_params(), config.stat_days())?;
        let groups = self.compiled_groups()?;
        let report = stat_report(&self.store, &groups, &range)?;

        println!(
            "Statistics from {} to {}:",
            time::format_day(report.first),
            time::format_day(report.last)
        );
        for total in &report.totals {
            let label = format!("{:>12}", total.label);
            println!(
                "{}: {}",
                self.renderer.paint(&total.color, &label),
                HoursMinutes(total.minutes)
            );
        }
        println!("{:>12}: {}", "Sum", HoursMinutes(report.sum));
        println!("{:>12}: {}", "Total", HoursMinutes(report.total));
        Ok(())
    }

    pub fn plot(&self, args: RangeArgs) -> Result<()> {
        let config = self.store.load_config()?;
        let range = self.resolve_range(&args.into_params(), config.stat_days())?;
        let groups = self.compiled_groups()?;
        let cells = minute_cells(&self.store, &groups, &range)?;

        // Each day becomes a 15x96 block filled column by column, and
        // alternating days run right-to-left so consecutive minutes
        // stay adjacent in the serpentine.
        let mut left_to_right = true;
        for day_cells in cells.chunks(time::MINUTES_PER_DAY as usize) {
            let mut grid = [[None; PLOT_COLUMNS]; PLOT_ROWS];
            for (minute, cell) in day_cells.iter().enumerate() {
                grid[minute % PLOT_ROWS][minute / PLOT_ROWS] = *cell;
            }
            for row in &grid {
                let mut line = String::new();
                let columns: Vec<usize> = if left_to_right {
                    (0..PLOT_COLUMNS).collect()
                } else {
                    (0..PLOT_COLUMNS).rev().collect()
                };
                for col in columns {
                    match row[col] {
                        Some(group) => {
                            line.push_str(
                                &self.renderer.paint(groups.get(group).color(), "o"),
                            );
                        }
                        None => line.push('.'),
                    }
                }
                println!("{line}");
            }
            left_to_right = !left_to_right;
        }
        Ok(())
    }

    fn print_job(&self, job: &Job, now: jiff::civil::DateTime) {
        println!(
            "  {:<32} last time {} ({} ago), time spent {}",
            job.content(),
            format_time(job.last()),
            Age(job.since(now)),
            Hm(job.minutes()),
        );
    }

    pub fn job(&self, args: RangeArgs) -> Result<()> {
        let config = self.store.load_config()?;
        let range = self.resolve_range(&args.into_params(), config.stat_days())?;
        let groups = self.compiled_groups()?;
        let report = job_report(&self.store, &groups, &range)?;
        let now = clock::now();

        for (group, jobs) in groups.iter().zip(&report.per_group) {
            if jobs.is_empty() {
                continue;
            }
            println!("[{}]", group.name());
            for job in jobs.by_content() {
                self.print_job(job, now);
            }
        }
        Ok(())
    }

    pub fn jobstat(&self, args: RangeArgs) -> Result<()> {
        let config = self.store.load_config()?;
        let range = self.resolve_range(&args.into_params(), config.stat_days())?;
        let groups = self.compiled_groups()?;
        let report = job_report(&self.store, &groups, &range)?;
        let now = clock::now();

        self.print_jobs_by_recency(&report.all, now);
        Ok(())
    }

    fn print_jobs_by_recency(&self, jobs: &JobSet, now: jiff::civil::DateTime) {
        for job in jobs.by_recency() {
            self.print_job(job, now);
        }
    }

    pub fn task(&self, command: Option<TaskCommands>) -> Result<()> {
        match command {
            None => {
                let tasks = self.store.load_tasks()?;
                for task in tasks.ordered() {
                    let line = format!(
                        "  {:>10}: level {:3}, {}",
                        task.name(),
                        task.level(),
                        task.content()
                    );
                    println!("{}", self.renderer.paint(task.color_class(), &line));
                }
            }
            Some(TaskCommands::Set { name, value }) => {
                let mut tasks = self.store.load_tasks()?;
                match value.parse::<i32>() {
                    Ok(level) => tasks.set_level(&name, level),
                    Err(_) => tasks.set_content(&name, &value),
                }
                self.store.save_tasks(&tasks)?;
                let task = tasks.get(&name).context("Task vanished after update")?;
                println!(
                    "Task {}: level {}, {}",
                    task.name(),
                    task.level(),
                    task.content()
                );
            }
        }
        Ok(())
    }

    pub fn set(&self, expr: String) -> Result<()> {
        let query = SetValue::parse(&expr)?;
        let mut settings = self.store.load_settings()?;
        match query.value {
            None => {
                let group = settings
                    .get(&query.group)
                    .with_context(|| format!("Group not exist: {}", query.group))?;
                match group.get(&query.key) {
                    Some(value) => println!("{}.{}: {}", query.group, query.key, value),
                    None => println!("Invalid key: {}", query.key),
                }
            }
            Some(value) => {
                if settings.get(&query.group).is_none() {
                    info!("Group {} not existed, created now", query.group);
                }
                settings.ensure(&query.group);
                settings
                    .get_mut(&query.group)
                    .context("Group vanished after creation")?
                    .set(&query.key, &value)?;
                self.store.save_settings(&settings)?;
                println!("{}.{} is set to {}", query.group, query.key, value);
            }
        }
        Ok(())
    }
}
