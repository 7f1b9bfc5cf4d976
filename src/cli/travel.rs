use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tabled::Table;

use crate::{
    config::Config,
    error,
    error::{ChartError, RunError},
    info,
    management::{PlaylistManager, TravelReport},
    spotify::SpotifyClient,
    types::ResolvedTrackTableRow,
    utils::{self, DATE_FORMAT},
    warning,
};

pub const DATE_PROMPT: &str = "Which musical year do you want to travel to? (YYYY-MM-DD)";

/// Asks for a date until a valid one is entered.
///
/// Returns `Ok(None)` if the input ends before a valid date was read.
pub fn prompt_for_date<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> io::Result<Option<NaiveDate>> {
    loop {
        writeln!(output, "{DATE_PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match utils::validate_date(&line, DATE_FORMAT, today) {
            Ok(date) => return Ok(Some(date)),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

pub async fn travel(config: &Config) {
    let date = {
        let mut input = io::stdin().lock();
        let mut output = io::stdout();
        match prompt_for_date(&mut input, &mut output, utils::today()) {
            Ok(Some(date)) => date,
            Ok(None) => {
                warning!("No date entered.");
                return;
            }
            Err(e) => error!("Failed to read date: {}", e),
        }
    };

    let manager = PlaylistManager::from_config(config);
    match manager.run(date, || SpotifyClient::connect(config)).await {
        Ok(report) => print_report(&report),
        Err(RunError::Chart(ChartError::EmptyBody)) => {
            warning!("Fail to get Billboard data, check network and try again.")
        }
        Err(RunError::Chart(e)) if e.is_network() => {
            warning!("Check Network connection and try again. ({})", e)
        }
        Err(RunError::Chart(_)) => warning!("No Tracks found for the date."),
        Err(e) => error!("Run stopped during {}: {}", e.stage(), e),
    }
}

fn print_report(report: &TravelReport) {
    let rows: Vec<ResolvedTrackTableRow> = report
        .tracks
        .iter()
        .enumerate()
        .map(|(i, t)| ResolvedTrackTableRow {
            rank: i + 1,
            track: t.title.clone(),
            uri: t.remote_track_id.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    println!("{}", Table::new(rows));
    info!(
        "{} of {} tracks added to {}",
        report.added,
        report.tracks.len(),
        report.playlist_name
    );
}
