use crossbeam_channel::{unbounded, Receiver, Sender};
use hashbrown::HashMap;
use parking_lot::Mutex;
use std::io::{self, Write};
use super::utils::float_to_string_general;

enum StatsMessage {
    Counter(&'static str, i64),
    MemoryCounter(&'static str, i64),
    IntDistribution(&'static str, i64),
    FloatDistribution(&'static str, f64),
    Percentage(&'static str, i64, i64),
    Ratio(&'static str, i64, i64)
}

#[derive(Default)]
struct StatsTotals {
    counters: HashMap<&'static str, i64>,
    memory_counters: HashMap<&'static str, i64>,
    // value is (sum, count, min, max)
    int_distributions: HashMap<&'static str, (i64, i64, i64, i64)>,
    // value is (sum, count, min, max)
    float_distributions: HashMap<&'static str, (f64, i64, f64, f64)>,
    percentages: HashMap<&'static str, (i64, i64)>,
    ratios: HashMap<&'static str, (i64, i64)>
}

impl StatsTotals {
    fn apply(&mut self, message: StatsMessage) {
        match message {
            StatsMessage::Counter(name, val) => {
                *self.counters.entry(name).or_default() += val;
            }
            StatsMessage::MemoryCounter(name, val) => {
                *self.memory_counters.entry(name).or_default() += val;
            }
            StatsMessage::IntDistribution(name, val) => {
                let distribution = self.int_distributions.entry(name).or_insert((0, 0, std::i64::MAX, std::i64::MIN));
                distribution.0 += val;
                distribution.1 += 1;
                distribution.2 = val.min(distribution.2);
                distribution.3 = val.max(distribution.3);
            }
            StatsMessage::FloatDistribution(name, val) => {
                let distribution = self.float_distributions.entry(name).or_insert((0.0, 0, std::f64::INFINITY, std::f64::NEG_INFINITY));
                distribution.0 += val;
                distribution.1 += 1;
                distribution.2 = val.min(distribution.2);
                distribution.3 = val.max(distribution.3);
            }
            StatsMessage::Percentage(name, num, denom) => {
                let percentage = self.percentages.entry(name).or_default();
                percentage.0 += num;
                percentage.1 += denom;
            }
            StatsMessage::Ratio(name, num, denom) => {
                let ratio = self.ratios.entry(name).or_default();
                ratio.0 += num;
                ratio.1 += denom;
            }
        }
    }
}

/// Upper bound on reports left waiting in the channel. The sender that fills
/// it folds the backlog into the totals.
pub const MAX_PENDING_REPORTS: usize = 4096;

/// Collects named statistics from any thread.
///
/// Reports are cheap channel sends; they are folded into the totals when
/// `accumulate` is called (reading a value or printing does this implicitly)
/// and whenever `MAX_PENDING_REPORTS` are waiting.
/// Names take the form `Category/Title`.
pub struct StatsAccumulator {
    sender: Sender<StatsMessage>,
    receiver: Receiver<StatsMessage>,
    totals: Mutex<StatsTotals>
}

lazy_static! {
    static ref INSTANCE: StatsAccumulator = StatsAccumulator::new();
}

impl StatsAccumulator {
    pub fn new() -> StatsAccumulator {
        let (sender, receiver) = unbounded::<StatsMessage>();
        StatsAccumulator {
            sender,
            receiver,
            totals: Mutex::new(StatsTotals::default())
        }
    }

    /// Returns the process wide StatsAccumulator.
    pub fn instance() -> &'static StatsAccumulator {
        &INSTANCE
    }

    // The receiver lives as long as the sender, so sends cannot fail.
    #[inline]
    fn send(&self, message: StatsMessage) {
        let _ = self.sender.send(message);
        if self.receiver.len() >= MAX_PENDING_REPORTS {
            self.accumulate();
        }
    }

    /// Number of reports not yet folded into the totals.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    pub fn report_counter(&self, name: &'static str, val: i64) {
        self.send(StatsMessage::Counter(name, val));
    }

    pub fn report_memory_counter(&self, name: &'static str, val: i64) {
        self.send(StatsMessage::MemoryCounter(name, val));
    }

    pub fn report_int_distribution(&self, name: &'static str, val: i64) {
        self.send(StatsMessage::IntDistribution(name, val));
    }

    pub fn report_float_distribution(&self, name: &'static str, val: f64) {
        self.send(StatsMessage::FloatDistribution(name, val));
    }

    pub fn report_percentage(&self, name: &'static str, num: i64, denom: i64) {
        self.send(StatsMessage::Percentage(name, num, denom));
    }

    pub fn report_ratio(&self, name: &'static str, num: i64, denom: i64) {
        self.send(StatsMessage::Ratio(name, num, denom));
    }

    /// Drain every pending report into the totals.
    pub fn accumulate(&self) {
        let mut totals = self.totals.lock();
        for message in self.receiver.try_iter() {
            totals.apply(message);
        }
    }

    pub fn counter(&self, name: &str) -> i64 {
        self.accumulate();
        self.totals.lock().counters.get(name).copied().unwrap_or(0)
    }

    pub fn memory_counter(&self, name: &str) -> i64 {
        self.accumulate();
        self.totals.lock().memory_counters.get(name).copied().unwrap_or(0)
    }

    /// Returns (sum, count, min, max) for an integer distribution.
    pub fn int_distribution(&self, name: &str) -> Option<(i64, i64, i64, i64)> {
        self.accumulate();
        self.totals.lock().int_distributions.get(name).copied()
    }

    pub fn print<T: Write>(&self, dest: &mut T) -> io::Result<()> {
        self.accumulate();
        let totals = self.totals.lock();
        let mut to_print: HashMap<&str, Vec<String>> = HashMap::default();

        for (counter, value) in &totals.counters {
            if *value == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(counter);
            to_print.entry(category).or_default().push(format!("{:<42}               {:12}", title, value));
        }

        for (counter, value) in &totals.memory_counters {
            if *value == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(counter);
            let mut value = *value as f64 / 1024.0;
            let unit = if value < 1024.0 {
                "kB"
            }
            else {
                value /= 1024.0;
                if value < 1024.0 {
                    "MiB"
                }
                else {
                    value /= 1024.0;
                    "GiB"
                }
            };
            to_print.entry(category).or_default().push(format!("{:<42}                  {:9.2} {}", title, value, unit));
        }

        for (counter, value) in &totals.int_distributions {
            if value.1 == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(counter);
            let avg = value.0 as f64 / value.1 as f64;
            to_print.entry(category).or_default().push(format!("{:<42}                      {:.3} avg [range {} - {}]", title, avg, value.2, value.3));
        }

        for (counter, value) in &totals.float_distributions {
            if value.1 == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(counter);
            let avg = value.0 / value.1 as f64;
            to_print.entry(category).or_default().push(format!("{:<42}                      {:.3} avg [range {} - {}]", title, avg,
                float_to_string_general(value.2 as _, 4), float_to_string_general(value.3 as _, 4)));
        }

        for (counter, value) in &totals.percentages {
            if value.1 == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(counter);
            let percent = value.0 as f64 * 100.0 / value.1 as f64;
            to_print.entry(category).or_default().push(format!("{:<42}{:12} / {:12} ({:.2}%)", title, value.0, value.1, percent));
        }

        for (counter, value) in &totals.ratios {
            if value.1 == 0 {
                continue;
            }
            let (category, title) = get_category_and_title(counter);
            let ratio = value.0 as f64 / value.1 as f64;
            to_print.entry(category).or_default().push(format!("{:<42}{:12} / {:12} ({:.2}x)", title, value.0, value.1, ratio));
        }

        let mut categories: Vec<_> = to_print.into_iter().collect();
        categories.sort_by(|a, b| a.0.cmp(b.0));
        writeln!(dest, "Statistics:")?;
        for (category, mut items) in categories {
            items.sort();
            writeln!(dest, "  {}", category)?;
            for item in items {
                writeln!(dest, "    {}", item)?;
            }
        }
        Ok(())
    }
}

impl Default for StatsAccumulator {
    fn default() -> StatsAccumulator {
        StatsAccumulator::new()
    }
}

#[inline]
pub fn get_category_and_title(s: &str) -> (&str, &str) {
    match s.find('/') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => ("", s)
    }
}
